use gsclog_engine::{format_launch, FormatError, LaunchCommand, LaunchError, LaunchSettings};

#[test]
fn formats_module_line_and_column() {
    let out = format_launch("{0} line {1} col {2}", "mod.gs", 10, 3).unwrap();
    assert_eq!(out, "mod.gs line 10 col 3");
}

#[test]
fn out_of_range_index_is_a_format_error() {
    let err = format_launch("{0} {3}", "mod.gs", 10, 3).unwrap_err();
    assert_eq!(
        err,
        FormatError::MissingArgument {
            index: 3,
            supplied: 3
        }
    );
}

#[test]
fn braces_can_be_escaped_and_repeated() {
    let out = format_launch("{{{0}}} {1}:{1}", "a.gsc", 7, 0).unwrap();
    assert_eq!(out, "{a.gsc} 7:7");
}

#[test]
fn format_suffix_is_ignored() {
    let out = format_launch("{1:D4}", "a.gsc", 7, 0).unwrap();
    assert_eq!(out, "7");
}

#[test]
fn unbalanced_braces_are_malformed() {
    assert!(matches!(
        format_launch("{0", "a", 1, 1),
        Err(FormatError::Malformed { position: 0, .. })
    ));
    assert!(matches!(
        format_launch("a}b", "a", 1, 1),
        Err(FormatError::Malformed { position: 1, .. })
    ));
    assert!(matches!(
        format_launch("{x}", "a", 1, 1),
        Err(FormatError::Malformed { .. })
    ));
}

#[test]
fn command_splits_formatted_arguments() {
    let settings = LaunchSettings {
        program: "notepad++".to_string(),
        args_template: "\"{0}\" -n{1} -c{2}".to_string(),
    };

    let command = settings.command("maps/my level.gsc", 12, 5).unwrap();

    assert_eq!(
        command,
        LaunchCommand {
            program: "notepad++".to_string(),
            args: vec![
                "maps/my level.gsc".to_string(),
                "-n12".to_string(),
                "-c5".to_string(),
            ],
        }
    );
}

#[test]
fn command_surfaces_template_errors() {
    let settings = LaunchSettings {
        program: "vim".to_string(),
        args_template: "+{1} {0} {5}".to_string(),
    };
    assert!(matches!(
        settings.command("a.gsc", 1, 1),
        Err(LaunchError::Format(FormatError::MissingArgument { index: 5, .. }))
    ));
}

#[test]
fn command_requires_a_program() {
    let settings = LaunchSettings {
        program: "  ".to_string(),
        args_template: "{0}".to_string(),
    };
    assert!(matches!(
        settings.command("a.gsc", 1, 1),
        Err(LaunchError::EmptyProgram)
    ));
}

#[test]
fn spawn_failure_is_reported() {
    let command = LaunchCommand {
        program: "gsclog-definitely-not-an-editor".to_string(),
        args: vec!["a.gsc".to_string()],
    };
    assert!(matches!(
        gsclog_engine::launch(&command),
        Err(LaunchError::Spawn { .. })
    ));
}

#[test]
fn alignment_beyond_u16_is_malformed() {
    let settings = LaunchSettings {
        program: "vim".to_string(),
        args_template: "{0,65536} +{1}".to_string(),
    };
    assert!(matches!(
        settings.command("a.gsc", 3, 4),
        Err(LaunchError::Format(FormatError::Malformed {
            position: 0,
            reason: "placeholder alignment out of range"
        }))
    ));
    assert!(matches!(
        format_launch("x{2,-70000}", "a.gsc", 3, 4),
        Err(FormatError::Malformed { position: 1, .. })
    ));
}

#[test]
fn widest_alignment_still_formats() {
    let out = format_launch("{2,65535}", "a.gsc", 3, 4).unwrap();
    assert_eq!(out.len(), 65535);
    assert!(out.ends_with(" 4"));
}

#[cfg(unix)]
#[test]
fn started_editor_is_left_running_detached() {
    let command = LaunchCommand {
        program: "true".to_string(),
        args: Vec::new(),
    };
    assert!(gsclog_engine::launch(&command).is_ok());
}
