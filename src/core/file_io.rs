use serde::Serialize;
use std::path::PathBuf;

pub fn extract_base_name(path: &str) -> &str {
    std::path::Path::new(path)
        .file_stem()
        .and_then(|name| name.to_str())
        .expect("Unable to extract base name")
}

pub fn date_time_string() -> String {
    use chrono::{Datelike, Local, Timelike};
    let local_time = Local::now();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        local_time.year(),
        local_time.month(),
        local_time.day(),
        local_time.hour(),
        local_time.minute(),
        local_time.second()
    )
}

pub fn maybe_date_time_string(enable: bool) -> Option<String> {
    if enable {
        Some(date_time_string())
    } else {
        None
    }
}

/// Output directory `out/<project>/<params base name>[/<datetime>]`, created
/// on demand.
pub fn build_output_path_with_date_time(
    params_path: &str,
    project: &str,
    datetime: &Option<String>,
) -> PathBuf {
    let mut dirs = vec!["out", project, extract_base_name(params_path)];
    if let Some(inner_datetime_str) = datetime {
        dirs.push(inner_datetime_str);
    }

    let directory_path: PathBuf = dirs.iter().collect();
    std::fs::create_dir_all(&directory_path).expect("Unable to create output directory");
    directory_path
}

pub fn serialize_to_json_or_panic<T: Serialize>(filename: PathBuf, data: &T) {
    let json = serde_json::to_string_pretty(data).expect("Unable to serialize parameters");
    std::fs::write(filename, json).expect("Unable to write parameter file");
}

/**
 * Store a path and prefix together, making it easy to quickly generate
 * a collection of files with the same prefix, but separate suffixes.
 */
pub struct FilePrefix {
    pub directory_path: PathBuf,
    pub file_base: String,
}

impl FilePrefix {
    pub fn full_path_with_suffix(&self, suffix: &str) -> PathBuf {
        self.directory_path.join(self.file_base.clone() + suffix)
    }

    pub fn create_file_with_suffix(&self, suffix: &str) -> std::io::BufWriter<std::fs::File> {
        let path = self.full_path_with_suffix(suffix);
        let file = std::fs::File::create(&path)
            .unwrap_or_else(|_| panic!("failed to create file: {:?}", path));
        std::io::BufWriter::new(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base_name() {
        assert_eq!(extract_base_name("demos/tiles/full-set.json"), "full-set");
        assert_eq!(extract_base_name("full-set.json"), "full-set");
    }

    #[test]
    fn test_full_path_with_suffix() {
        let file_prefix = FilePrefix {
            directory_path: PathBuf::from("out/tiles"),
            file_base: "full-set".to_owned(),
        };
        assert_eq!(
            file_prefix.full_path_with_suffix(".png"),
            PathBuf::from("out/tiles/full-set.png")
        );
    }
}
