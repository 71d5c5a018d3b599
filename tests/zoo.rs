use minitrees::prelude::*;
use minitrees::rank;


fn zoo() -> InstanceTable {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/dataset/zoo.arff");
    ArffReader::default()
        .file(path)
        .read()
        .unwrap()
}


fn zoo_without_names() -> InstanceTable {
    zoo().project_by_name(&["animal"]).unwrap()
}


#[test]
fn read_zoo() {
    let table = zoo();
    assert_eq!((100, 18), table.shape());
    assert_eq!("zoo", table.relation());
    assert_eq!("type", table.catalog().target().name());
    assert_eq!(
        vec![41, 20, 5, 13, 3, 8, 10],
        table.label_counts(),
    );
}


#[test]
fn project_drops_animal() {
    let table = zoo();
    let projected = zoo_without_names();

    assert_eq!(table.n_instances(), projected.n_instances());
    assert_eq!(17, projected.n_attributes());
    assert!(projected.catalog().index_of("animal").is_none());
    assert_eq!(16, projected.catalog().target_index());
    assert_eq!(table.labels(), projected.labels());
}


#[test]
fn rank_zoo() {
    let ranked = rank(&zoo_without_names());
    let names = ranked.iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>();
    let exp = vec![
        "legs", "milk", "toothed", "eggs", "hair", "feathers",
        "backbone", "breathes", "tail", "airborne", "fins", "aquatic",
        "catsize", "venomous", "predator", "domestic",
    ];
    assert_eq!(exp, names, "expected {exp:?}, got {names:?}.");

    assert!((ranked[0].gain - 1.3625).abs() < 1e-4, "got {}.", ranked[0].gain);
    assert!(ranked.windows(2).all(|w| w[0].gain >= w[1].gain));
}


#[test]
fn unpruned_zoo_tree() {
    let table = zoo_without_names();
    let tree = DecisionTreeBuilder::new()
        .pruned(false)
        .build()
        .unwrap()
        .fit(&table)
        .unwrap();

    assert_eq!(10, tree.n_leaves());
    assert_eq!(19, tree.size());

    let text = tree.describe();
    assert!(text.starts_with("milk = false\n|   feathers = false\n"), "{text}");
    assert!(text.ends_with("milk = true: mammal (41.0)\n"), "{text}");

    // The zoo has no two identical animals with different types.
    let evaluation = Evaluation::of(&tree, &table);
    assert_eq!(100, evaluation.summary.correct);
}


#[test]
fn pruned_zoo_tree() {
    let table = zoo_without_names();
    let unpruned = DecisionTreeBuilder::new()
        .pruned(false)
        .build()
        .unwrap()
        .fit(&table)
        .unwrap();
    let pruned = TreeLearner::default().fit(&table).unwrap();

    assert!(pruned.size() <= unpruned.size());
    assert_eq!(7, pruned.n_leaves());
    assert_eq!(13, pruned.size());
    assert!(
        pruned.describe().contains("|   |   |   airborne = false: invertebrate (12.0/2.0)\n"),
        "{}", pruned.describe()
    );

    let evaluation = Evaluation::of(&pruned, &table);
    assert_eq!(97, evaluation.summary.correct);
}


#[test]
fn classify_unicorn() {
    let table = zoo_without_names();
    let tree = DecisionTreeBuilder::new()
        .pruned(false)
        .build()
        .unwrap()
        .fit(&table)
        .unwrap();

    let unicorn = Instance::from_pairs(table.catalog(), &[
        ("hair", "true"), ("feathers", "false"), ("eggs", "false"),
        ("milk", "true"), ("airborne", "false"), ("aquatic", "false"),
        ("predator", "false"), ("toothed", "true"), ("backbone", "true"),
        ("breathes", "true"), ("venomous", "true"), ("fins", "false"),
        ("legs", "4"), ("tail", "true"), ("domestic", "true"),
        ("catsize", "false"),
    ]).unwrap();

    assert_eq!("mammal", tree.classify_label(&unicorn));
    assert_eq!(0, tree.try_classify(&unicorn).unwrap());
}


#[test]
fn cross_validate_zoo() {
    let table = zoo_without_names();
    let learner = TreeLearner::default();
    let evaluation = CrossValidation::new(&table)
        .n_folds(10)
        .seed(1)
        .evaluate(&learner)
        .unwrap();

    let summary = evaluation.summary;
    assert_eq!(100, summary.total);
    assert_eq!(100, summary.correct + summary.incorrect);
    assert_eq!(table.label_counts(), evaluation.confusion.actual_totals());
    assert!(summary.accuracy() > 0.8, "got {summary:?}.");

    let again = cross_validate(
        &table, &learner, CrossValidationOptions::default()
    ).unwrap();
    assert_eq!(evaluation, again);

    let text = evaluation.to_string();
    assert!(text.contains("Correctly Classified Instances"));
    assert!(text.contains("<-- classified as"));
    assert!(text.contains("g = invertebrate"));
}


#[test]
fn zoo_to_dot() {
    let tree = TreeLearner::default().fit(&zoo_without_names()).unwrap();
    let dot = tree.to_dot();
    assert!(dot.starts_with("graph DecisionTree {"));
    let n_nodes = dot.lines()
        .filter(|line| line.contains("[ label") && !line.contains("--"))
        .count();
    assert_eq!(tree.size(), n_nodes);
}
