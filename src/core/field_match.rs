use smallvec::SmallVec;

/// Read-only view over the field names of the active dataset.
pub trait FieldCatalog {
    /// Returns the canonical field name matched by `query`, if any.
    fn match_field(&self, query: &str) -> Option<&str>;

    fn contains_field(&self, query: &str) -> bool {
        self.match_field(query).is_some()
    }
}

/// Matches free-form label text against field names.
///
/// The text is trimmed, then compared exactly. When no exact match exists a
/// case-insensitive comparison is tried and accepted only if it is unique.
pub fn match_field_name<'a, I>(query: &str, names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let mut folded: SmallVec<[&'a str; 2]> = SmallVec::new();
    for name in names {
        if name == query {
            return Some(name);
        }
        if folded.len() < 2 && name.eq_ignore_ascii_case(query) {
            folded.push(name);
        }
    }

    match folded.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

impl FieldCatalog for [String] {
    fn match_field(&self, query: &str) -> Option<&str> {
        match_field_name(query, self.iter().map(String::as_str))
    }
}

impl FieldCatalog for Vec<String> {
    fn match_field(&self, query: &str) -> Option<&str> {
        self.as_slice().match_field(query)
    }
}
