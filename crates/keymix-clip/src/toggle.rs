//! Matched enable/disable clip pairs

use crate::encode::encode_toggle_clip;
use std::path::Path;

/// File names for an enable/disable pair of toggle clips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleClipPair {
    pub enable_file: String,
    pub disable_file: String,
}

impl Default for ToggleClipPair {
    fn default() -> Self {
        Self {
            enable_file: "Enable.anim".to_string(),
            disable_file: "Disable.anim".to_string(),
        }
    }
}

impl ToggleClipPair {
    /// Default names, prefixed with the active object's name when there is one
    pub fn for_object(active: Option<&str>) -> Self {
        match active {
            Some(name) => Self {
                enable_file: format!("{}Enable.anim", name),
                disable_file: format!("{}Disable.anim", name),
            },
            None => Self::default(),
        }
    }

    /// Clip names are the file stems.
    pub fn clip_names(&self) -> (String, String) {
        (stem(&self.enable_file), stem(&self.disable_file))
    }

    /// Encode both clips for the same object paths: `(enable_text, disable_text)`
    pub fn encode<S: AsRef<str>>(&self, paths: &[S]) -> (String, String) {
        let (enable_name, disable_name) = self.clip_names();
        (
            encode_toggle_clip(&enable_name, paths, true),
            encode_toggle_clip(&disable_name, paths, false),
        )
    }
}

fn stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let pair = ToggleClipPair::for_object(None);
        assert_eq!(pair.enable_file, "Enable.anim");
        assert_eq!(pair.disable_file, "Disable.anim");
        assert_eq!(
            pair.clip_names(),
            ("Enable".to_string(), "Disable".to_string())
        );
    }

    #[test]
    fn test_names_for_active_object() {
        let pair = ToggleClipPair::for_object(Some("Hat"));
        assert_eq!(pair.enable_file, "HatEnable.anim");
        assert_eq!(pair.disable_file, "HatDisable.anim");
    }

    #[test]
    fn test_encode_pair_shares_paths() {
        let pair = ToggleClipPair::for_object(Some("Hat"));
        let (enable, disable) = pair.encode(&["Hat", "Armature/Hips/Hat Pin"]);
        assert!(enable.contains("m_Name: HatEnable\n"));
        assert!(disable.contains("m_Name: HatDisable\n"));
        for text in [&enable, &disable] {
            assert!(text.contains("path: Hat\n"));
            assert!(text.contains("path: Armature/Hips/Hat Pin\n"));
        }
        assert_eq!(enable.matches("value: 1\n").count(), 4);
        assert_eq!(disable.matches("value: 0\n").count(), 4);
    }
}
