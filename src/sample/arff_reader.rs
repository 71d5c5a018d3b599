use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TreeError};
use super::attribute_struct::{Attribute, AttributeCatalog};
use super::instance_struct::Instance;
use super::table_struct::InstanceTable;


/// A struct that reads an ARFF file into an [`InstanceTable`].
///
/// Nominal (`{a,b,c}`) and `numeric`/`real`/`integer` attributes are
/// supported, the latter with an optional `[min,max]` range.
/// The last attribute is the target unless
/// [`target_attribute`](ArffReader::target_attribute) says otherwise.
///
/// # Example
/// ```no_run
/// use minitrees::ArffReader;
/// let table = ArffReader::default()
///     .file("/path/to/zoo.arff")
///     .target_attribute("type")
///     .read()
///     .unwrap();
/// println!("{} instances loaded!", table.n_instances());
/// ```
#[derive(Debug, Default, Clone)]
pub struct ArffReader {
    file: Option<PathBuf>,
    target: Option<String>,
}


impl ArffReader {
    /// Set the file name.
    pub fn file<P: AsRef<Path>>(mut self, file: P) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }


    /// Set the attribute that is used for the target label.
    pub fn target_attribute<S: AsRef<str>>(mut self, name: S) -> Self {
        self.target = Some(name.as_ref().to_string());
        self
    }


    /// Reads the file and returns the validated table.
    /// This method consumes `self`.
    pub fn read(self) -> Result<InstanceTable> {
        let path = self.file
            .ok_or_else(|| TreeError::invalid_option(
                "file", "the ARFF file is not set"
            ))?;
        let text = fs::read_to_string(&path)
            .map_err(|source| TreeError::Io { path: path.clone(), source })?;

        read_arff_str(&text, self.target.as_deref())
    }
}


/// Parse ARFF text.
/// `target` names the label attribute; `None` selects the last one.
pub fn read_arff_str(text: &str, target: Option<&str>)
    -> Result<InstanceTable>
{
    let mut relation = None;
    let mut attributes = Vec::new();
    // Flags the attributes declared as `integer`.
    let mut integral = Vec::new();
    let mut rows = Vec::new();
    let mut in_data = false;

    for (n, line) in text.lines().enumerate() {
        let line_no = n + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') { continue; }

        if in_data {
            if line.starts_with('{') {
                return Err(TreeError::parse(
                    line_no, "sparse instances are not supported"
                ));
            }
            rows.push((line_no, split_tokens(line, line_no)?));
            continue;
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };
        match keyword.to_ascii_lowercase().as_str() {
            "@relation" => {
                let (name, _) = take_name(rest, line_no)?;
                relation = Some(name);
            },
            "@attribute" => {
                let (attribute, is_integer) = parse_attribute(rest, line_no)?;
                attributes.push(attribute);
                integral.push(is_integer);
            },
            "@data" => { in_data = true; },
            _ => {
                return Err(TreeError::parse(
                    line_no, format!("unexpected line `{line}`")
                ));
            },
        }
    }

    if !in_data {
        return Err(TreeError::parse(
            text.lines().count(), "missing `@data` section"
        ));
    }
    if attributes.is_empty() {
        return Err(TreeError::parse(1, "no attribute is declared"));
    }

    let catalog = match target {
        Some(name) => AttributeCatalog::with_target_name(attributes, name)?,
        None => {
            let last = attributes.len() - 1;
            AttributeCatalog::new(attributes, last)?
        },
    };

    let instances = rows.into_iter()
        .map(|(line_no, tokens)| {
            let instance = Instance::from_tokens(&catalog, &tokens)
                .map_err(|e| TreeError::parse(line_no, e.to_string()))?;
            check_integral(&catalog, &integral, &instance, line_no)?;
            Ok(instance)
        })
        .collect::<Result<Vec<_>>>()?;

    let table = InstanceTable::new(catalog, instances)?;
    Ok(match relation {
        Some(relation) => table.with_relation(relation),
        None => table,
    })
}


/// Rejects a non-integral value of an `integer` attribute.
fn check_integral(
    catalog: &AttributeCatalog,
    integral: &[bool],
    instance: &Instance,
    line_no: usize,
) -> Result<()>
{
    let offending = instance.values()
        .iter()
        .zip(integral)
        .position(|(value, &is_integer)| {
            is_integer
                && value.as_numeric().is_some_and(|x| x.fract() != 0f64)
        });
    match offending {
        Some(ix) => Err(TreeError::parse(line_no, format!(
            "attribute `{}` is declared integer, got {}",
            catalog.attributes()[ix].name(),
            instance.value(ix).as_numeric().unwrap_or_default(),
        ))),
        None => Ok(()),
    }
}


/// Parses the rest of an `@attribute` line.
/// The flag is `true` for attributes declared as `integer`.
fn parse_attribute(rest: &str, line_no: usize) -> Result<(Attribute, bool)> {
    let (name, kind) = take_name(rest, line_no)?;
    let kind = kind.trim();

    if let Some(inner) = kind.strip_prefix('{') {
        let inner = inner.strip_suffix('}')
            .ok_or_else(|| TreeError::parse(line_no, "unterminated `{`"))?;
        let values = split_tokens(inner, line_no)?;
        return Ok((Attribute::categorical(name, values), false));
    }

    let lower = kind.to_ascii_lowercase();
    let range = ["numeric", "real", "integer"].iter()
        .find_map(|ty| lower.strip_prefix(ty))
        .ok_or_else(|| TreeError::parse(
            line_no, format!("unsupported attribute type `{kind}`")
        ))?
        .trim();

    let is_integer = lower.starts_with("integer");
    if range.is_empty() {
        return Ok((Attribute::numeric(name), is_integer));
    }

    let bounds = range.strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .and_then(|r| r.split_once(','))
        .and_then(|(lb, ub)| {
            let lb = lb.trim().parse::<f64>().ok()?;
            let ub = ub.trim().parse::<f64>().ok()?;
            Some((lb, ub))
        })
        .ok_or_else(|| TreeError::parse(
            line_no, format!("malformed range `{range}`")
        ))?;

    Ok((Attribute::bounded(name, bounds.0, bounds.1), is_integer))
}


/// Reads one (possibly quoted) name at the head of `text`.
/// Returns the name and the remaining text.
fn take_name(text: &str, line_no: usize) -> Result<(String, &str)> {
    let text = text.trim_start();
    let Some(quote) = text.chars().next().filter(|c| *c == '\'' || *c == '"')
    else {
        let end = text.find(char::is_whitespace).unwrap_or(text.len());
        if end == 0 {
            return Err(TreeError::parse(line_no, "missing name"));
        }
        return Ok((text[..end].to_string(), &text[end..]));
    };

    let mut name = String::new();
    let mut chars = text.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() { name.push(escaped); }
            },
            c if c == quote => return Ok((name, &text[i + 1..])),
            c => name.push(c),
        }
    }
    Err(TreeError::parse(line_no, "unterminated quote"))
}


/// Splits a comma separated line, honoring quotes.
fn split_tokens(line: &str, line_no: usize) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(_), '\\') => {
                if let Some(escaped) = chars.next() { current.push(escaped); }
            },
            (Some(q), c) if c == q => { quote = None; },
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => { quote = Some(c); },
            (None, ',') => {
                tokens.push(current.trim().to_string());
                current.clear();
            },
            (None, c) => current.push(c),
        }
    }

    if quote.is_some() {
        return Err(TreeError::parse(line_no, "unterminated quote"));
    }
    tokens.push(current.trim().to_string());
    Ok(tokens)
}
