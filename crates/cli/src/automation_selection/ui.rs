use std::io::{BufRead, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::debug;

use super::types::{AutomationChoice, AutomationForDisplay};
use super::QUIT_OPTION;
use autorun_core::automation::Automation;
use autorun_core::catalog::Catalog;
use autorun_core::error::Result;

/// Prompts the user to choose an automation from the catalog.
///
/// The input can be a 1-based number, an automation id, or search text that
/// is fuzzy-matched against ids, names and descriptions. A search that
/// matches several automations lists them and asks again.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn prompt_for_automation_choice<R: BufRead, W: Write>(
    catalog: &Catalog,
    input: &mut R,
    output: &mut W,
) -> Result<AutomationChoice> {
    loop {
        queue!(
            output,
            SetAttribute(Attribute::Bold),
            Print(format!(
                "Select an automation (number, id or search, `{QUIT_OPTION}` to quit): "
            )),
            SetAttribute(Attribute::Reset)
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // End of input behaves like quitting
            return Ok(AutomationChoice::Quit);
        }

        let predicate = line.trim();
        if predicate.is_empty() {
            continue;
        }

        if predicate.eq_ignore_ascii_case(&QUIT_OPTION.to_string()) {
            return Ok(AutomationChoice::Quit);
        }

        if let Ok(number) = predicate.parse::<usize>() {
            if (1..=catalog.len()).contains(&number) {
                return Ok(AutomationChoice::Index(number - 1));
            }
            print_notice(output, &format!("There is no automation number {number}!"))?;
            continue;
        }

        if catalog.find(predicate).is_some() {
            return Ok(AutomationChoice::AutomationId(predicate.to_string()));
        }

        let matches = filter_displayed_indexes(catalog.automations(), predicate);
        debug!("Search `{predicate}` matched {matches:?}");

        match matches.as_slice() {
            [] => print_notice(output, "No matching automations!")?,
            [index] => return Ok(AutomationChoice::Index(*index)),
            _ => {
                for &index in &matches {
                    let automation = &catalog.automations()[index];
                    queue!(
                        output,
                        Print(display_for(index, automation)),
                        Print("\n")
                    )?;
                }
            }
        }
    }
}

fn display_for(index: usize, automation: &Automation) -> AutomationForDisplay<'_> {
    AutomationForDisplay {
        index,
        name: &automation.name,
        description: &automation.description,
    }
}

fn print_notice<W: Write>(output: &mut W, notice: &str) -> Result<()> {
    queue!(
        output,
        SetForegroundColor(Color::Red),
        Print(notice),
        ResetColor,
        Print("\n")
    )?;
    Ok(())
}

/// Positions of the automations whose id, name or description fuzzy-match
/// the predicate, in catalog order.
fn filter_displayed_indexes(automations: &[Automation], predicate: &str) -> Vec<usize> {
    let matcher = SkimMatcherV2::default();

    automations
        .iter()
        .enumerate()
        .filter_map(|(i, automation)| {
            let searchable = format!(
                "{} {} {}",
                automation.id, automation.name, automation.description
            );
            matcher.fuzzy_match(&searchable, predicate).map(|_| i)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn automation(id: &str, name: &str, description: &str) -> Automation {
        Automation {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            parameters: vec![],
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            automation("file_organizer", "File Organizer", "Sorts files into folders"),
            automation("data_backup", "Data Backup", "Copies data somewhere safe"),
            automation("log_cleanup", "Log Cleanup", "Removes old log files"),
        ])
    }

    fn choose(input: &str) -> (AutomationChoice, String) {
        let mut output = Vec::new();
        let choice =
            prompt_for_automation_choice(&catalog(), &mut Cursor::new(input), &mut output).unwrap();
        (choice, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_choose_by_number() {
        let (choice, _) = choose("2\n");
        assert_eq!(choice, AutomationChoice::Index(1));
    }

    #[test]
    fn test_choose_by_id() {
        let (choice, _) = choose("log_cleanup\n");
        assert_eq!(choice, AutomationChoice::AutomationId("log_cleanup".to_string()));
    }

    #[test]
    fn test_choose_by_unique_search() {
        let (choice, _) = choose("backup\n");
        assert_eq!(choice, AutomationChoice::Index(1));
    }

    #[test]
    fn test_out_of_range_number_asks_again() {
        let (choice, output) = choose("7\n\n1\n");
        assert_eq!(choice, AutomationChoice::Index(0));
        assert!(output.contains("There is no automation number 7!"));
    }

    #[test]
    fn test_no_match_asks_again() {
        let (choice, output) = choose("zzzz\nq\n");
        assert_eq!(choice, AutomationChoice::Quit);
        assert!(output.contains("No matching automations!"));
    }

    #[test]
    fn test_ambiguous_search_lists_matches() {
        let (choice, output) = choose("files\n3\n");
        assert_eq!(choice, AutomationChoice::Index(2));
        assert!(output.contains("1. File Organizer"));
        assert!(output.contains("3. Log Cleanup"));
        assert!(!output.contains("Data Backup"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let (choice, _) = choose("");
        assert_eq!(choice, AutomationChoice::Quit);
    }

    #[test]
    fn test_filter_displayed_indexes() {
        let catalog = catalog();
        assert_eq!(filter_displayed_indexes(catalog.automations(), "organ"), vec![0]);
        assert_eq!(filter_displayed_indexes(catalog.automations(), "xyz"), Vec::<usize>::new());
    }
}
