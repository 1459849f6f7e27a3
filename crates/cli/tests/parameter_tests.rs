#[cfg(test)]
mod tests {
    use autorun_cli::arguments::process_command_line;
    use autorun_cli::arguments::style::{determine, Style};
    use autorun_cli::arguments::validation::should_prompt_for_parameters;
    use autorun_cli::automation_selection::fill_parameter_values;
    use autorun_core::automation::{Automation, FieldValue};
    use autorun_core::form::Form;
    use indexmap::IndexSet;
    use std::io::Cursor;

    const ORGANIZER_JSON: &str = r#"{
        "id": "file_organizer",
        "name": "File Organizer",
        "description": "Sorts files into folders",
        "parameters": [
            {"name": "source_folder", "label": "Source Folder", "type": "text", "required": true},
            {"name": "organize_by", "type": "select", "options": ["extension", "date"], "default": "date"},
            {"name": "dry_run", "type": "checkbox", "default": true}
        ]
    }"#;

    fn organizer_form() -> Form {
        let automation: Automation = serde_json::from_str(ORGANIZER_JSON).unwrap();
        Form::build(&automation)
    }

    fn names(values: &[&str]) -> IndexSet<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parameter_mode_determination() {
        // Test with no parameters
        let empty_named: Vec<String> = vec![];
        let empty_positional: Vec<String> = vec![];
        let style = determine(&empty_named, &empty_positional).unwrap();
        assert!(matches!(style, Style::None));

        // Test with named parameters
        let named = vec!["key1=value1".to_string(), "key2=value2".to_string()];
        let style = determine(&named, &empty_positional).unwrap();
        assert!(matches!(style, Style::Named(pairs) if pairs.len() == 2));

        // Test a named parameter without a value (should error before any lookup)
        let malformed = vec!["key1".to_string()];
        assert!(determine(&malformed, &empty_positional).is_err());

        // Test with positional arguments
        let positional = vec!["value1".to_string(), "value2".to_string()];
        let style = determine(&empty_named, &positional).unwrap();
        assert!(matches!(style, Style::Positional(_)));

        // Test mixed parameters (should error)
        let result = determine(&named, &positional);
        assert!(result.is_err());
    }

    #[test]
    fn test_should_prompt_for_parameters() {
        let form = organizer_form();

        // Case 1: Nothing to fill
        assert!(!should_prompt_for_parameters(
            &Form::empty(),
            &IndexSet::new(),
            &Style::None
        ));

        // Case 2: No command-line parameters, prompts even with defaults
        assert!(should_prompt_for_parameters(&form, &IndexSet::new(), &Style::None));

        let style = Style::Named(vec![("source_folder".to_string(), "/tmp".to_string())]);

        // Case 3: Command-line parameters that cover every field
        assert!(!should_prompt_for_parameters(
            &form,
            &names(&["source_folder", "organize_by", "dry_run"]),
            &style
        ));

        // Case 4: Command-line parameters that are missing some fields
        assert!(should_prompt_for_parameters(&form, &names(&["source_folder"]), &style));
    }

    #[test]
    fn test_named_arguments_then_prompt_for_the_rest() {
        let mut form = organizer_form();
        let style = determine(&["source_folder=/srv/in".to_string()], &[]).unwrap();

        let provided = process_command_line(&style, &mut form).unwrap();
        assert!(should_prompt_for_parameters(&form, &provided, &style));

        // Keep the provided value, pick the first choice, untick the box
        let mut input = Cursor::new("\n1\nn\n");
        fill_parameter_values(&mut form, false, &mut input, &mut Vec::new()).unwrap();

        assert_eq!(
            form.widget("source_folder").unwrap().value(),
            FieldValue::Text("/srv/in".to_string())
        );
        assert_eq!(
            form.widget("organize_by").unwrap().value(),
            FieldValue::Text("extension".to_string())
        );
        assert_eq!(form.widget("dry_run").unwrap().value(), FieldValue::Flag(false));
    }

    #[test]
    fn test_positional_arguments_fill_everything() {
        let mut form = organizer_form();
        let style = Style::Positional(vec![
            "/srv/in".to_string(),
            "extension".to_string(),
            "off".to_string(),
        ]);

        let provided = process_command_line(&style, &mut form).unwrap();

        assert!(!should_prompt_for_parameters(&form, &provided, &style));
        assert_eq!(form.widget("dry_run").unwrap().value(), FieldValue::Flag(false));
    }
}
