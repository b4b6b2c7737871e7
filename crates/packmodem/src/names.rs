/// A fixed set of property names a host expects in an object.
///
/// MessagePack maps carry their keys inline, so the reader and writer accept
/// these only to satisfy the token contract. Hosts use [`get`](Self::get) and
/// [`position`](Self::position) to match incoming keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyNames {
    names: Vec<String>,
}

impl PropertyNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the stored name equal to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.iter().map(String::as_str).find(|found| *found == name)
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|found| found == name)
    }

    #[must_use]
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
