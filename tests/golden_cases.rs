use inlinemark::config::parse_config_str;
use inlinemark::{dump, parse_with};
use std::{fs, path::Path};

fn normalize(s: &str) -> String {
    s.replace("\r\n", "\n")
}

#[test]
fn golden_cases() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("cases");

    let mut entries: Vec<_> = fs::read_dir(&root)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_dir())
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let update = std::env::var_os("UPDATE_EXPECTED").is_some();

    for entry in entries {
        let dir = entry.path();
        let input_path = dir.join("input.md");
        let config_path = dir.join("definitions.toml");
        let expected_path = dir.join("expected.txt");

        let input = normalize(&fs::read_to_string(&input_path).unwrap());
        let input = input.strip_suffix('\n').unwrap_or(&input);

        let cfg = match fs::read_to_string(&config_path) {
            Ok(s) => parse_config_str(&s, &config_path).unwrap(),
            Err(_) => Default::default(),
        };
        let tree = parse_with(input, &cfg.definitions(), cfg.parse_options());
        let output = dump(&tree, input);

        if update {
            fs::write(&expected_path, &output).unwrap();
            continue;
        }

        let expected = normalize(&fs::read_to_string(&expected_path).unwrap());

        similar_asserts::assert_eq!(
            expected,
            output,
            "case: {}",
            dir.file_name().unwrap().to_string_lossy()
        );
    }
}
