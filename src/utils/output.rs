use crate::utils::errors::Result;
use serde::Serialize;
use std::fmt::Display;

/// Output format configuration
#[derive(Clone, Debug)]
pub struct OutputFormat {
    pub json: bool,
}

impl OutputFormat {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Render single-column data - either a JSON array or one item per line
    pub fn render_list<T>(&self, items: &[T]) -> Result<String>
    where
        T: Display + Serialize,
    {
        if self.json {
            return Ok(serde_json::to_string_pretty(items)?);
        }

        Ok(items
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Print single-column data
    pub fn print_list<T>(&self, items: &[T]) -> Result<()>
    where
        T: Display + Serialize,
    {
        if items.is_empty() && !self.json {
            return Ok(());
        }
        println!("{}", self.render_list(items)?);
        Ok(())
    }

    /// Print raw tool output, wrapped in a JSON object when requested
    pub fn print_command_output(&self, output: &str) -> Result<()> {
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "output": output }))?
            );
        } else {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }

    /// Print an optional single value
    pub fn print_optional<T>(&self, value: Option<&T>) -> Result<()>
    where
        T: Display + Serialize,
    {
        match value {
            Some(v) if self.json => println!("{}", serde_json::to_string(v)?),
            Some(v) => println!("{v}"),
            None if self.json => println!("null"),
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_list() {
        let format = OutputFormat::new(false);
        let rendered = format.render_list(&["79ad16a1", "00"]).unwrap();
        assert_eq!(rendered, "79ad16a1\n00");
    }

    #[test]
    fn test_json_list() {
        let format = OutputFormat::new(true);
        let rendered = format.render_list(&["79ad16a1", "00"]).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, vec!["79ad16a1", "00"]);
    }

    #[test]
    fn test_json_empty_list() {
        let format = OutputFormat::new(true);
        let empty: Vec<String> = Vec::new();
        assert_eq!(format.render_list(&empty).unwrap(), "[]");
    }
}
