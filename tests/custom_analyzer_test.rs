use std::io::Write;

use stemma::analysis::analyzer::analyzer::Analyzer;
use stemma::analysis::factory::CustomAnalyzerConfig;
use stemma::error::StemmaError;

#[test]
fn test_custom_pipeline_from_json() {
    let config = CustomAnalyzerConfig::from_json(
        r#"{
            "name": "short_words",
            "tokenizer": {"type": "standard"},
            "filters": [
                {"type": "lowercase"},
                {"type": "length", "min": 2, "max": 6},
                {"type": "stop", "words": ["the", "a"]},
                {"type": "limit", "max_token_count": 3, "consume_all_tokens": true}
            ]
        }"#,
    )
    .unwrap();
    let analyzer = config.build().unwrap();
    assert_eq!(
        analyzer.description().to_string(),
        "standard -> lowercase -> length -> stop -> limit"
    );

    let text = "The extraordinary cat sat on a mat today";
    let output = analyzer.analyze_output("body", text).unwrap();
    assert_eq!(output.terms(), vec!["cat", "sat", "on"]);
    // "the" and "extraordinary" are skipped before "cat"
    assert_eq!(output.increments(), vec![3, 1, 1]);
    assert_eq!(output.final_offset, text.chars().count());
}

#[test]
fn test_regex_tokenizer_with_keyword_marker() {
    let config = CustomAnalyzerConfig::from_json(
        r#"{
            "tokenizer": {"type": "regex", "pattern": "[,;]\\s*", "gaps": true},
            "filters": [
                {"type": "lowercase"},
                {"type": "keyword_marker", "words": "Running", "ignore_case": true},
                {"type": "porter_stem"}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(config.name, "custom");

    let tokens = config.build().unwrap().analyze("tags", "Running; jumping,walking").unwrap();
    let terms: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(terms, vec!["running", "jump", "walk"]);
    assert!(tokens[0].keyword);
}

#[test]
fn test_config_file_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"tokenizer": {{"type": "whitespace"}}, "filters": [{{"type": "length", "max": 4, "mni": 1, "maximum": 9}}]}}"#
    )
    .unwrap();

    let config = CustomAnalyzerConfig::from_path(file.path()).unwrap();
    let err = config.build().unwrap_err();
    assert!(matches!(err, StemmaError::Configuration(_)));
    assert!(err.to_string().ends_with("length: unknown parameters: maximum, mni"));

    let err = CustomAnalyzerConfig::from_json(r#"{"tokenizer": {"type": "whole"}, "stages": []}"#).unwrap_err();
    assert!(matches!(err, StemmaError::Json(_)));

    let err = CustomAnalyzerConfig::from_path("/nonexistent/analyzer.json").unwrap_err();
    assert!(matches!(err, StemmaError::Configuration(_)));
}
