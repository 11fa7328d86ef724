use super::query::Query;

/// Ordered collection of every query discovered during one scan
///
/// Insertion order is reporting order and defines the positional alignment
/// with the database results. Duplicates are kept on purpose: they are
/// grouped by source later, never merged here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBatch {
    queries: Vec<Query>,
}

impl QueryBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, query: Query) {
        self.queries.push(query);
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Query> {
        self.queries.iter()
    }
}

impl Extend<Query> for QueryBatch {
    fn extend<T: IntoIterator<Item = Query>>(&mut self, iter: T) {
        self.queries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a QueryBatch {
    type Item = &'a Query;
    type IntoIter = std::slice::Iter<'a, Query>;

    fn into_iter(self) -> Self::IntoIter {
        self.queries.iter()
    }
}
