use crate::structs::Field;
use log::debug;

/// Header spellings accepted for one field, compared after trimming and lowercasing.
#[derive(Debug, Clone, Copy)]
pub struct SynonymSet {
    pub field: Field,
    pub names: &'static [&'static str],
}

pub const DEFAULT_SYNONYMS: &[SynonymSet] = &[
    SynonymSet {
        field: Field::AppName,
        names: &["app_name", "name", "application"],
    },
    SynonymSet {
        field: Field::Package,
        names: &["package", "pkg", "package_name"],
    },
    SynonymSet {
        field: Field::Publisher,
        names: &["publisher", "publisher_name", "vendor"],
    },
];

/// Zero-based column index for each field, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub app_name: Option<usize>,
    pub package: Option<usize>,
    pub publisher: Option<usize>,
}

impl ColumnMap {
    pub fn get(&self, field: Field) -> Option<usize> {
        match field {
            Field::AppName => self.app_name,
            Field::Package => self.package,
            Field::Publisher => self.publisher,
        }
    }

    pub fn set(&mut self, field: Field, index: usize) {
        let slot = match field {
            Field::AppName => &mut self.app_name,
            Field::Package => &mut self.package,
            Field::Publisher => &mut self.publisher,
        };
        *slot = Some(index);
    }
}

/// Maps header names to output fields, falling back to fixed positions.
#[derive(Debug, Clone, Copy)]
pub struct ColumnResolver {
    synonyms: &'static [SynonymSet],
}

impl Default for ColumnResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SYNONYMS)
    }
}

impl ColumnResolver {
    pub fn new(synonyms: &'static [SynonymSet]) -> Self {
        Self { synonyms }
    }

    /// Resolves a column for each field.
    ///
    /// Headers are scanned in order and a later match overwrites an earlier one.
    /// Fields left unmapped then take their positional fallback, provided the
    /// header row is wide enough to hold it.
    ///
    /// # Arguments
    ///
    /// * `headers` - Header cells in column order
    ///
    /// # Returns
    ///
    /// Returns a `ColumnMap`; a field is `None` when no header names it and the
    /// row is too narrow for its fallback column.
    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> ColumnMap {
        let mut map = ColumnMap::default();

        for (index, header) in headers.iter().enumerate() {
            let normalized = normalize_header(header.as_ref());
            for set in self.synonyms {
                if set.names.contains(&normalized.as_str()) {
                    map.set(set.field, index);
                }
            }
        }

        for field in Field::ALL {
            let fallback = field.fallback_index();
            if map.get(field).is_none() && headers.len() > fallback {
                debug!("No header matched {}, using column {}", field, fallback);
                map.set(field, fallback);
            }
        }

        map
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_synonyms_ignoring_case_and_whitespace() {
        let map = ColumnResolver::default().resolve(&["  VENDOR ", "Pkg", "Application\t"]);
        assert_eq!(map.app_name, Some(2));
        assert_eq!(map.package, Some(1));
        assert_eq!(map.publisher, Some(0));
    }

    #[test]
    fn unrecognized_headers_use_positions() {
        let map = ColumnResolver::default().resolve(&["foo", "bar", "baz", "qux"]);
        assert_eq!(
            map,
            ColumnMap {
                app_name: Some(0),
                package: Some(1),
                publisher: Some(2),
            }
        );
    }

    #[test]
    fn spaced_header_is_not_a_synonym() {
        let map = ColumnResolver::default().resolve(&["Notes", "App Name", "Package"]);
        assert_eq!(map.app_name, Some(0));
        assert_eq!(map.package, Some(2));
        assert_eq!(map.publisher, Some(2));
    }

    #[test]
    fn narrow_header_leaves_fields_unmapped() {
        let map = ColumnResolver::default().resolve(&["whatever"]);
        assert_eq!(map.app_name, Some(0));
        assert_eq!(map.package, None);
        assert_eq!(map.publisher, None);

        let empty: [&str; 0] = [];
        assert_eq!(ColumnResolver::default().resolve(&empty), ColumnMap::default());
    }

    #[test]
    fn last_duplicate_header_wins() {
        let map = ColumnResolver::default().resolve(&["name", "package", "application"]);
        assert_eq!(map.app_name, Some(2));
        assert_eq!(map.package, Some(1));
        assert_eq!(map.publisher, Some(2));
    }

    #[test]
    fn name_match_beyond_fallback_range_takes_priority() {
        let map = ColumnResolver::default().resolve(&["a", "b", "c", "d", "package_name"]);
        assert_eq!(map.package, Some(4));
        assert_eq!(map.app_name, Some(0));
        assert_eq!(map.publisher, Some(2));
    }

    #[test]
    fn custom_synonym_table() {
        static ONLY_TITLE: &[SynonymSet] = &[SynonymSet {
            field: Field::AppName,
            names: &["title"],
        }];
        let map = ColumnResolver::new(ONLY_TITLE).resolve(&["id", "Title"]);
        assert_eq!(map.app_name, Some(1));
        assert_eq!(map.package, Some(1));
        assert_eq!(map.publisher, None);
    }
}
