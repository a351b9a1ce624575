use manhattan_realty::deal::{DealReceipt, Transcript};
use manhattan_realty::error::AppError;
use manhattan_realty::format::Decimal;
use manhattan_realty::property::Property;
use manhattan_realty::search::SearchOutcome;
use serde::Serialize;
use serde_json::json;

/// Prints command results either as the plain text lines the engine produces
/// or as pretty JSON.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Output {
    json: bool,
}

impl Output {
    pub(crate) fn new(json: bool) -> Self {
        Self { json }
    }

    pub(crate) fn properties(&self, properties: &[Property]) -> Result<(), AppError> {
        if self.json {
            return print_json(&properties);
        }
        if properties.is_empty() {
            println!("No properties listed.");
        }
        for property in properties {
            println!("{property}");
        }
        Ok(())
    }

    pub(crate) fn property(&self, property: &Property) -> Result<(), AppError> {
        if self.json {
            return print_json(property);
        }
        println!("{property}");
        println!("total price: {}", Decimal(property.total_price()));
        Ok(())
    }

    pub(crate) fn message(&self, message: &str) -> Result<(), AppError> {
        if self.json {
            return print_json(&json!({ "message": message }));
        }
        println!("{message}");
        Ok(())
    }

    pub(crate) fn outcome(&self, outcome: &SearchOutcome) -> Result<(), AppError> {
        match outcome {
            SearchOutcome::Matches(properties) => self.properties(properties),
            SearchOutcome::Average(average) if self.json => {
                print_json(&json!({ "average_price": average }))
            }
            SearchOutcome::Average(average) => {
                println!(
                    "Average price of properties in the radius: {}",
                    Decimal(*average)
                );
                Ok(())
            }
        }
    }

    pub(crate) fn receipt(&self, receipt: &DealReceipt) -> Result<(), AppError> {
        if self.json {
            return print_json(receipt);
        }
        self.transcript(&receipt.transcript)
    }

    /// Transcript lines in text mode; JSON mode prints nothing here.
    pub(crate) fn transcript(&self, transcript: &Transcript) -> Result<(), AppError> {
        if self.json {
            return Ok(());
        }
        for line in transcript.lines() {
            println!("{line}");
        }
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}
