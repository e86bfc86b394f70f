use optkit_argparse::{HelpFormatter, Opt, Options, parse};

fn registry() -> Options {
    let mut options = Options::new();
    options
        .add_flag("v", Some("verbose"), false, "Chatty output")
        .unwrap()
        .add_flag("f", Some("file"), true, "Input file")
        .unwrap()
        .add(
            Opt::long_only("level")
                .has_arg(true)
                .description("Compression level")
                .build()
                .unwrap(),
        )
        .unwrap()
        .add(
            Opt::builder("o")
                .long("output")
                .arg_name("path")
                .has_arg(true)
                .build()
                .unwrap(),
        )
        .unwrap();
    options
}

/// Turn every `[-x <NAME>]` item of a usage line into argv tokens, using
/// `name-value` as the value.
fn example_argv(usage: &str) -> Vec<String> {
    let items = usage
        .strip_prefix("Usage: app ")
        .expect("usage prefix");
    let mut argv = Vec::new();
    for item in items.split("] [") {
        let item = item.trim_matches(|c| c == '[' || c == ']');
        let mut parts = item.split(' ');
        argv.push(parts.next().expect("option name").to_string());
        if let Some(placeholder) = parts.next() {
            let name = placeholder.trim_matches(|c| c == '<' || c == '>');
            argv.push(format!("{}-value", name.to_lowercase()));
        }
    }
    argv
}

#[test]
fn usage_line_parses_back_into_every_option() {
    let options = registry();
    let usage = HelpFormatter::new().render_usage(500, "app", &options);
    assert_eq!(
        usage,
        "Usage: app [-f <FILE>] [--level <LEVEL>] [-o <PATH>] [-v]"
    );

    let argv = example_argv(&usage);
    let cmd = parse(&options, &argv).unwrap();

    assert!(cmd.args().is_empty());
    for opt in &options {
        assert_eq!(cmd.occurrences(opt.key()), 1, "{}", opt.key());
        if opt.has_arg() {
            let expected = format!(
                "{}-value",
                opt.display_arg_name().unwrap().to_lowercase()
            );
            assert_eq!(cmd.option_values(opt.key()), [expected.as_str()]);
        } else {
            assert!(cmd.option_values(opt.key()).is_empty());
        }
    }
    let keys: Vec<&str> = cmd.iter().map(Opt::key).collect();
    assert_eq!(keys, ["f", "level", "o", "v"]);
}

#[test]
fn help_table_names_parse_back() {
    let options = registry();
    let table = HelpFormatter::new().render_options(500, &options, 1, 3);
    for row in table.lines() {
        let name = row
            .split_whitespace()
            .next()
            .expect("row starts with a name")
            .trim_end_matches(',');
        let opt = options.find(name).expect("listed option is registered");
        let mut argv = vec![name.to_string()];
        if opt.has_arg() {
            argv.push("x".to_string());
        }
        let cmd = parse(&options, &argv).unwrap();
        assert!(cmd.has_option(opt.key()));
        assert!(cmd.args().is_empty());
    }
}
