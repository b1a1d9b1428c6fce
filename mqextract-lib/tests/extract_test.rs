use mqextract_lib::config::{Options, Target};
use mqextract_lib::extract::{extract, run, Extraction};
use mqextract_lib::parser::css::parse_stylesheet;
use mqextract_lib::style::classify::classify;
use mqextract_lib::style::collection::COLLECTION_SEPARATOR;
use mqextract_lib::style::owned_css::{ProcessedStylesheet, StyleRule};
use mqextract_lib::Error;
use std::fs;

#[cfg(test)]
pub mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MOBILE_FIRST: &str = r#"
/* Base */
body { margin: 0; }

@media (min-width: 768px) {
  .a { color: blue; }
}

.nav { display: block; }

@media (min-width: 480px) {
  .small { padding: 4px; }
}

@media (min-width:768px) {
  /* tablet again */
  .c { float: left; }
}
"#;

    fn css_of<'a>(extraction: &'a Extraction, tag: &str) -> &'a str {
        extraction
            .bucket(tag)
            .map(|bucket| bucket.css.as_str())
            .unwrap_or_else(|| panic!("no `{}` bucket", tag))
    }

    fn tags(extraction: &Extraction) -> Vec<&str> {
        extraction.buckets.iter().map(|b| b.tag.as_str()).collect()
    }

    fn partition(processed: &ProcessedStylesheet) -> (Vec<String>, Vec<(String, Vec<String>)>) {
        fn names(rules: &[StyleRule]) -> Vec<String> {
            rules
                .iter()
                .map(|rule| match rule {
                    StyleRule::Rule(rule) => rule.selectors.join(","),
                    StyleRule::Comment(text) => format!("/*{}*/", text),
                    other => format!("{:?}", other),
                })
                .collect()
        }
        let groups = processed
            .media_groups
            .iter()
            .map(|group| (group.id.clone(), names(&group.rules)))
            .collect();
        (names(&processed.base), groups)
    }

    #[test]
    fn test_end_to_end_three_buckets() {
        let css = "body { margin: 0; }\n\
                   @media (min-width: 1024px) { .b { color: green; } }\n\
                   @media (min-width: 768px) { .a { color: blue; } }";
        let extraction = extract(css, &Options::default()).unwrap();

        assert_eq!(
            tags(&extraction),
            vec!["base", "min-width-768px", "min-width-1024px"]
        );
        assert_eq!(css_of(&extraction, "base"), "body {\n\tmargin: 0;\n}\n\n");
        assert_eq!(
            css_of(&extraction, "min-width-768px"),
            "@media (min-width: 768px) {\n\n.a {\n\tcolor: blue;\n}\n\n}\n\n"
        );
        assert_eq!(
            css_of(&extraction, "min-width-1024px"),
            "@media (min-width: 1024px) {\n\n.b {\n\tcolor: green;\n}\n\n}\n\n"
        );
    }

    #[test]
    fn test_spacing_variants_merge_into_one_file() {
        let extraction = extract(MOBILE_FIRST, &Options::default()).unwrap();
        assert_eq!(
            tags(&extraction),
            vec!["base", "min-width-480px", "min-width-768px"]
        );
        assert_eq!(
            css_of(&extraction, "min-width-768px"),
            "@media (min-width: 768px) {\n\n\
             .a {\n\tcolor: blue;\n}\n\n\
             /* tablet again */\n\n\
             .c {\n\tfloat: left;\n}\n\n\
             }\n\n"
        );
        assert_eq!(
            css_of(&extraction, "base"),
            "/* Base */\n\nbody {\n\tmargin: 0;\n}\n\n.nav {\n\tdisplay: block;\n}\n\n"
        );
    }

    #[test]
    fn test_hide_comments_everywhere() {
        let options = Options {
            hide_comments: true,
            ..Options::default()
        };
        let extraction = extract(MOBILE_FIRST, &options).unwrap();
        for bucket in &extraction.buckets {
            assert!(!bucket.css.contains("/*"), "{}: {}", bucket.tag, bucket.css);
        }
        assert_eq!(
            css_of(&extraction, "min-width-768px"),
            "@media (min-width: 768px) {\n\n.a {\n\tcolor: blue;\n}\n\n.c {\n\tfloat: left;\n}\n\n}\n\n"
        );
    }

    #[test]
    fn test_hide_comments_inside_values_and_selectors() {
        let css = "a /* x */ { color: red /* keep? */; margin: 0 }\n\
                   @media /* c */ print { .b, /* y */ .c { display: none /* z */ } }";
        let options = Options {
            hide_comments: true,
            ..Options::default()
        };
        let extraction = extract(css, &options).unwrap();
        for bucket in &extraction.buckets {
            assert!(!bucket.css.contains("/*"), "{}: {}", bucket.tag, bucket.css);
        }
        assert_eq!(
            css_of(&extraction, "base"),
            "a {\n\tcolor: red;\n\tmargin: 0;\n}\n\n"
        );
        assert_eq!(
            css_of(&extraction, "print"),
            "@media print {\n\n.b,\n.c {\n\tdisplay: none;\n}\n\n}\n\n"
        );
    }

    #[test]
    fn test_star_hack_does_not_fail_the_file() {
        let css = ".a { *zoom: 1; color: red }\n@media print { .a { *display: inline } }";
        let extraction = extract(css, &Options::default()).unwrap();
        assert_eq!(
            css_of(&extraction, "base"),
            ".a {\n\t*zoom: 1;\n\tcolor: red;\n}\n\n"
        );
        assert_eq!(
            css_of(&extraction, "print"),
            "@media print {\n\n.a {\n\t*display: inline;\n}\n\n}\n\n"
        );
    }

    #[test]
    fn test_byte_order_mark_is_dropped() {
        let css = "\u{feff}body { margin: 0 }\n@media print { a { b: c } }";
        let extraction = extract(css, &Options::default()).unwrap();
        assert_eq!(css_of(&extraction, "base"), "body {\n\tmargin: 0;\n}\n\n");
    }

    #[test]
    fn test_media_tags_never_overwrite_other_buckets() {
        let css = "body { margin: 0 }\n\
                   @media base { .a { x: 1 } }\n\
                   @media keyframes { .k { x: 1 } }\n\
                   @media { .b { x: 2 } }\n\
                   @keyframes spin { to { opacity: 1 } }";
        let options = Options {
            breakpoint_collections: true,
            ..Options::default()
        };
        let extraction = extract(css, &options).unwrap();
        assert_eq!(
            tags(&extraction),
            vec![
                "base",
                "media-base",
                "media-keyframes",
                "media",
                "keyframes",
                "base_media-base",
                "base_media-keyframes",
                "base_media",
            ]
        );
        assert_eq!(css_of(&extraction, "base"), "body {\n\tmargin: 0;\n}\n\n");

        let mut unique = tags(&extraction);
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), extraction.buckets.len());
    }

    #[test]
    fn test_stylesheet_without_media() {
        let css = "/* a */\nh1 { x: 1 }\n@font-face { font-family: F; }\np { y: 2 }";
        let extraction = extract(css, &Options::default()).unwrap();
        assert!(!extraction.has_media());
        assert_eq!(tags(&extraction), vec!["base"]);

        let processed = classify(&parse_stylesheet(css).unwrap().rules);
        let (base, groups) = partition(&processed);
        assert_eq!(base.len(), 4);
        assert_eq!(base[0], "/* a */");
        assert_eq!(base[1], "h1");
        assert_eq!(base[3], "p");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_reclassifying_output_gives_same_partition() {
        let extraction = extract(MOBILE_FIRST, &Options::default()).unwrap();
        let rejoined: String = extraction
            .buckets
            .iter()
            .map(|bucket| bucket.css.as_str())
            .collect();

        let original = classify(&parse_stylesheet(MOBILE_FIRST).unwrap().rules);
        let reparsed = classify(&parse_stylesheet(&rejoined).unwrap().rules);
        assert_eq!(partition(&reparsed).0, partition(&original).0);

        let mut original_groups = partition(&original).1;
        original_groups.sort();
        let mut reparsed_groups = partition(&reparsed).1;
        reparsed_groups.sort();
        assert_eq!(reparsed_groups, original_groups);

        let again = extract(&rejoined, &Options::default()).unwrap();
        assert_eq!(again, extraction);
    }

    #[test]
    fn test_collections_accumulate_breakpoints() {
        let options = Options {
            breakpoint_collections: true,
            ..Options::default()
        };
        let extraction = extract(MOBILE_FIRST, &options).unwrap();
        let base = css_of(&extraction, "base");
        let small = css_of(&extraction, "min-width-480px");
        let tablet = css_of(&extraction, "min-width-768px");

        assert_eq!(
            css_of(&extraction, "base_min-width-480px"),
            [base, small].join(COLLECTION_SEPARATOR)
        );
        assert_eq!(
            css_of(&extraction, "base_min-width-768px"),
            [base, small, tablet].join(COLLECTION_SEPARATOR)
        );
    }

    #[test]
    fn test_keyframes_bucket() {
        let css = "@-webkit-keyframes spin { from { -webkit-transform: rotate(0deg) } to { -webkit-transform: rotate(360deg) } }\n\
                   @media print { .x { display: none } }";
        let extraction = extract(css, &Options::default()).unwrap();
        assert_eq!(tags(&extraction), vec!["print", "keyframes"]);
        assert_eq!(
            css_of(&extraction, "keyframes"),
            "@-webkit-keyframes spin {\n\n\
             from {\n\t-webkit-transform: rotate(0deg);\n}\n\n\
             to {\n\t-webkit-transform: rotate(360deg);\n}\n\n\
             }\n\n"
        );
    }

    #[test]
    fn test_run_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let src_dir = dir.path().join("css");
        fs::create_dir(&src_dir).unwrap();
        fs::write(src_dir.join("styles.css"), MOBILE_FIRST).unwrap();
        fs::write(src_dir.join("plain.css"), "a { b: c }").unwrap();

        let target = Target {
            src: vec![format!("{}/*.css", src_dir.display())],
            dest: dir.path().join("dist"),
        };
        let options = Options {
            breakpoint_collections: true,
            ..Options::default()
        };
        let summary = run(&[target], &options).unwrap();
        assert!(summary.is_success());
        assert_eq!(summary.files.len(), 2);

        let dist = dir.path().join("dist");
        let mut written: Vec<String> = fs::read_dir(&dist)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        written.sort();
        assert_eq!(
            written,
            vec![
                "plain-base.css",
                "styles-base.css",
                "styles-base_min-width-480px.css",
                "styles-base_min-width-768px.css",
                "styles-min-width-480px.css",
                "styles-min-width-768px.css",
            ]
        );
        assert_eq!(
            fs::read_to_string(dist.join("styles-min-width-480px.css")).unwrap(),
            "@media (min-width: 480px) {\n\n.small {\n\tpadding: 4px;\n}\n\n}\n\n"
        );
    }

    #[test]
    fn test_strict_mode_fails_only_the_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.css"), "a { b: c }").unwrap();
        fs::write(dir.path().join("b.css"), "@media print { a { b: c } }").unwrap();

        let target = Target {
            src: vec![
                format!("{}/a.css", dir.path().display()),
                format!("{}/b.css", dir.path().display()),
            ],
            dest: dir.path().join("out"),
        };
        let options = Options {
            fail_on_missing_media: true,
            ..Options::default()
        };
        let summary = run(&[target], &options).unwrap();
        assert_eq!(summary.files.len(), 1);
        assert!(matches!(
            summary.failures.as_slice(),
            [Error::NoMediaQueries { .. }]
        ));
        assert!(dir.path().join("out/b-print.css").is_file());
        assert!(!dir.path().join("out/a-base.css").exists());
    }

    #[test]
    fn test_parse_failure_does_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.css"), "a { color red }").unwrap();
        fs::write(dir.path().join("good.css"), "@media print { a { b: c } }").unwrap();

        let target = Target {
            src: vec![format!("{}/*.css", dir.path().display())],
            dest: dir.path().join("out"),
        };
        let summary = run(&[target], &Options::default()).unwrap();
        assert_eq!(summary.files.len(), 1);
        assert!(matches!(
            summary.failures.as_slice(),
            [Error::Parse { .. }]
        ));
    }

    #[test]
    fn test_no_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let target = Target {
            src: vec![format!("{}/missing/*.css", dir.path().display())],
            dest: dir.path().to_path_buf(),
        };
        assert!(matches!(
            run(&[target], &Options::default()),
            Err(Error::NoInputMatched { .. })
        ));
    }
}
