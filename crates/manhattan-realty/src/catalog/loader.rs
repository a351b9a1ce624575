use crate::error::FailureKind;
use crate::property::{Address, Property, PropertyError};
use std::io::Read;

const FIELDS_PER_LINE: usize = 4;

/// Failure while reading a bulk property listing.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file path cannot be empty")]
    EmptyPath,
    #[error("Error reading from file: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("invalid property format on line {line}: {reason}")]
    Malformed { line: u64, reason: String },
    #[error("invalid property on line {line}: {source}")]
    InvalidProperty {
        line: u64,
        #[source]
        source: PropertyError,
    },
    #[error("duplicate address {address} on line {line}")]
    DuplicateAddress { line: u64, address: Address },
}

impl LoadError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LoadError::EmptyPath | LoadError::InvalidProperty { .. } => {
                FailureKind::InvalidArgument
            }
            LoadError::Io { .. } => FailureKind::Io,
            LoadError::Malformed { .. } => FailureKind::Malformed,
            LoadError::DuplicateAddress { .. } => FailureKind::Conflict,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}

/// A parsed listing line together with where it came from.
#[derive(Debug)]
pub(crate) struct ListingLine {
    pub(crate) line: u64,
    pub(crate) property: Property,
}

/// Parses `<address> <area> <price per m2> <sold>` lines, one property each.
/// Whitespace around a line is ignored and blank lines are skipped.
pub(crate) fn parse_listing<R: Read>(reader: R) -> Result<Vec<ListingLine>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut parsed = Vec::new();

    for record in csv_reader.records() {
        let record = record.map_err(from_csv_error)?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let fields: Vec<&str> = record.iter().collect();
        let fields = trim_edges(&fields);
        if fields.is_empty() {
            continue;
        }
        let property = parse_fields(fields, line)?;
        parsed.push(ListingLine { line, property });
    }

    Ok(parsed)
}

/// Drops the empty fields a space delimiter yields for leading or trailing
/// whitespace. Empty fields between values are kept so the count check
/// still rejects doubled separators.
fn trim_edges<'a>(fields: &'a [&'a str]) -> &'a [&'a str] {
    let start = fields
        .iter()
        .position(|field| !field.is_empty())
        .unwrap_or(fields.len());
    let end = fields
        .iter()
        .rposition(|field| !field.is_empty())
        .map_or(start, |last| last + 1);
    &fields[start..end]
}

fn parse_fields(fields: &[&str], line: u64) -> Result<Property, LoadError> {
    if fields.len() != FIELDS_PER_LINE {
        return Err(LoadError::Malformed {
            line,
            reason: format!(
                "expected {FIELDS_PER_LINE} parts but found {}",
                fields.len()
            ),
        });
    }

    let coordinates = fields[0]
        .split(',')
        .map(|raw| raw.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| LoadError::Malformed {
            line,
            reason: format!("error parsing address '{}': {err}", fields[0]),
        })?;
    if coordinates.len() < Address::MIN_COORDINATES {
        return Err(LoadError::Malformed {
            line,
            reason: "address must contain at least street and avenue coordinates".to_string(),
        });
    }

    let area = parse_decimal(fields[1], "area", line)?;
    let price_per_square_meter = parse_decimal(fields[2], "price per square meter", line)?;
    let sold = fields[3].eq_ignore_ascii_case("true");

    Property::new(coordinates, area, price_per_square_meter, sold)
        .map_err(|source| LoadError::InvalidProperty { line, source })
}

fn parse_decimal(raw: &str, field: &str, line: u64) -> Result<f64, LoadError> {
    raw.parse::<f64>().map_err(|err| LoadError::Malformed {
        line,
        reason: format!("error parsing {field} '{raw}': {err}"),
    })
}

fn from_csv_error(err: csv::Error) -> LoadError {
    let line = err.position().map(|position| position.line()).unwrap_or(0);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::Io { source },
        _ => LoadError::Malformed { line, reason },
    }
}
