use crate::error::{Result, ScaffoldError};
use crate::models::draft::FeatureDraft;
use crate::services::format::format;
use crate::services::layout::ProjectLayout;
use crate::services::style::StyleConfig;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// A formatted feature file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFeature {
    pub destination: PathBuf,
    pub text: String,
}

/// What a scaffolding run did with the rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The text was printed; the filesystem was not touched.
    Previewed,
    /// The text was written to this path.
    Written(PathBuf),
}

/// Builds and formats the feature file for `identifier` without writing it.
///
/// # Errors
/// Returns an error if the draft cannot be serialized, the style configuration
/// cannot be loaded, or the destination type has no formatter.
pub fn render_feature(
    layout: &ProjectLayout,
    identifier: &str,
    draft: &FeatureDraft,
) -> Result<RenderedFeature> {
    let destination = layout.feature_path(identifier);
    debug!(destination = %destination.display(), "Resolved feature path");

    let document = draft.to_document()?;
    let style = StyleConfig::load(&layout.style_config())?;
    let options = style.resolve(&destination);
    let text = format(&document, &destination, &options)?;

    Ok(RenderedFeature { destination, text })
}

/// Scaffolds the feature file for `identifier`.
///
/// With `dry_run`, the formatted text goes to `preview` followed by a newline,
/// and nothing is written to disk. Otherwise an existing file at the destination
/// is overwritten.
///
/// # Errors
/// Returns an error if rendering fails (see [`render_feature`]) or if the text
/// cannot be written to the destination or to `preview`.
pub fn create_feature(
    layout: &ProjectLayout,
    identifier: &str,
    draft: &FeatureDraft,
    dry_run: bool,
    preview: &mut impl Write,
) -> Result<Outcome> {
    let RenderedFeature { destination, text } = render_feature(layout, identifier, draft)?;

    if dry_run {
        writeln!(preview, "{text}")
            .and_then(|()| preview.flush())
            .map_err(|e| ScaffoldError::io("<stdout>", e))?;
        return Ok(Outcome::Previewed);
    }

    fs::write(&destination, text).map_err(|e| ScaffoldError::io(&destination, e))?;

    Ok(Outcome::Written(destination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_yaml::Value;
    use std::path::Path;
    use tempfile::{TempDir, tempdir};

    const EXPECTED_FOO: &str =
        "spec: https://example.org/spec\ncaniuse: foo-bar\ncompat_features:\n  - \"\"\n";

    fn project(style: &str) -> (TempDir, ProjectLayout) {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".prettierrc"), style).unwrap();
        fs::create_dir(dir.path().join("feature-group-definitions")).unwrap();
        let layout = ProjectLayout::new(dir.path());
        (dir, layout)
    }

    fn entries(path: &Path) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> =
            fs::read_dir(path).unwrap().map(|entry| entry.unwrap().path()).collect();
        found.sort();
        found
    }

    #[test]
    fn writes_feature_file() {
        let (_dir, layout) = project("{}\n");
        let draft = FeatureDraft::new("https://example.org/spec", "foo-bar");

        let outcome = create_feature(&layout, "foo", &draft, false, &mut Vec::new()).unwrap();

        let path = layout.features_dir().join("foo.yml");
        assert_eq!(outcome, Outcome::Written(path.clone()));
        assert_eq!(fs::read_to_string(path).unwrap(), EXPECTED_FOO);
    }

    #[test]
    fn dry_run_prints_and_leaves_disk_untouched() {
        let (_dir, layout) = project("{}\n");
        let draft = FeatureDraft::new("https://example.org/spec", "foo-bar");
        let mut preview = Vec::new();

        let outcome = create_feature(&layout, "foo", &draft, true, &mut preview).unwrap();

        assert_eq!(outcome, Outcome::Previewed);
        assert_eq!(String::from_utf8(preview).unwrap(), format!("{EXPECTED_FOO}\n"));
        assert!(entries(&layout.features_dir()).is_empty());
    }

    #[test]
    fn empty_metadata_is_quoted() {
        let (_dir, layout) = project("{}\n");
        let rendered = render_feature(&layout, "foo", &FeatureDraft::new("", "")).unwrap();
        assert_eq!(rendered.text, "spec: \"\"\ncaniuse: \"\"\ncompat_features:\n  - \"\"\n");
    }

    #[test]
    fn noncharacters_are_escaped() {
        let (_dir, layout) = project("{}\n");
        let draft = FeatureDraft::new("x\u{FFFE}", "\u{FFFF}");

        let rendered = render_feature(&layout, "foo", &draft).unwrap();
        assert_eq!(
            rendered.text,
            "spec: \"x\\uFFFE\"\ncaniuse: \"\\uFFFF\"\ncompat_features:\n  - \"\"\n"
        );

        let document: Value = serde_yaml::from_str(&rendered.text).unwrap();
        assert_eq!(document["spec"], Value::from("x\u{FFFE}"));
        assert_eq!(document["caniuse"], Value::from("\u{FFFF}"));
    }

    #[test]
    fn style_overrides_apply_to_feature_files() {
        let (_dir, layout) = project(
            "overrides:\n  - files: \"feature-group-definitions/*.yml\"\n    options:\n      tabWidth: 4\n      singleQuote: true\n",
        );
        let rendered = render_feature(&layout, "foo", &FeatureDraft::new("", "foo-bar")).unwrap();
        assert_eq!(rendered.text, "spec: ''\ncaniuse: foo-bar\ncompat_features:\n    - ''\n");
    }

    #[test]
    fn second_run_overwrites_first() {
        let (_dir, layout) = project("{}\n");
        let first = FeatureDraft::new("https://example.org/old", "old-id");
        let second = FeatureDraft::new("https://example.org/new", "new-id");

        create_feature(&layout, "foo", &first, false, &mut Vec::new()).unwrap();
        create_feature(&layout, "foo", &second, false, &mut Vec::new()).unwrap();

        let text = fs::read_to_string(layout.feature_path("foo")).unwrap();
        assert_eq!(
            text,
            "spec: https://example.org/new\ncaniuse: new-id\ncompat_features:\n  - \"\"\n"
        );
        assert_eq!(entries(&layout.features_dir()).len(), 1);
    }

    #[test]
    fn missing_style_config_writes_nothing() {
        let (dir, layout) = project("{}\n");
        fs::remove_file(dir.path().join(".prettierrc")).unwrap();
        let draft = FeatureDraft::new("https://example.org/spec", "foo-bar");

        let err = create_feature(&layout, "foo", &draft, false, &mut Vec::new()).unwrap_err();

        assert!(matches!(err, ScaffoldError::Config { .. }), "unexpected error: {err}");
        assert!(entries(&layout.features_dir()).is_empty());
    }

    #[test]
    fn missing_config_keeps_existing_file() {
        let (dir, layout) = project("{}\n");
        fs::write(layout.feature_path("foo"), "spec: keep\n").unwrap();
        fs::remove_file(dir.path().join(".prettierrc")).unwrap();

        let draft = FeatureDraft::new("https://example.org/spec", "foo-bar");
        assert!(create_feature(&layout, "foo", &draft, false, &mut Vec::new()).is_err());

        assert_eq!(fs::read_to_string(layout.feature_path("foo")).unwrap(), "spec: keep\n");
    }

    #[test]
    fn missing_destination_dir_is_an_io_error() {
        let (dir, layout) = project("{}\n");
        fs::remove_dir(dir.path().join("feature-group-definitions")).unwrap();
        let draft = FeatureDraft::new("https://example.org/spec", "foo-bar");

        let err = create_feature(&layout, "foo", &draft, false, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { .. }), "unexpected error: {err}");

        let preview = create_feature(&layout, "foo", &draft, true, &mut Vec::new()).unwrap();
        assert_eq!(preview, Outcome::Previewed);
    }

    proptest! {
        #[test]
        fn rendering_is_deterministic_and_shaped(
            spec in "[ -~]{0,40}",
            caniuse in "[ -~]{0,40}",
            single_quote in any::<bool>(),
        ) {
            let (_dir, layout) = project(&format!("singleQuote: {single_quote}\n"));
            let draft = FeatureDraft::new(spec.clone(), caniuse.clone());

            let first = render_feature(&layout, "foo", &draft).unwrap();
            let second = render_feature(&layout, "foo", &draft).unwrap();
            prop_assert_eq!(&first, &second);

            let document: Value = serde_yaml::from_str(&first.text).unwrap();
            let Value::Mapping(map) = document else {
                return Err(TestCaseError::fail("document is not a mapping"));
            };
            let keys: Vec<&str> = map.keys().filter_map(Value::as_str).collect();
            prop_assert_eq!(keys, vec!["spec", "caniuse", "compat_features"]);
            prop_assert_eq!(&map["spec"], &Value::String(spec));
            prop_assert_eq!(&map["caniuse"], &Value::String(caniuse));
            prop_assert_eq!(&map["compat_features"], &Value::Sequence(vec![Value::from("")]));
        }
    }
}
