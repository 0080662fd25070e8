//! Author entity.

/// A book author. Owns the books that reference it through `Book::author_id`;
/// removing an author removes those books.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub biography: Option<String>,
}

impl Author {
    pub fn new(id: i64, name: String, biography: Option<String>) -> Self {
        Self {
            id,
            name,
            biography,
        }
    }
}

/// Input data for creating or replacing an author.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
    pub name: String,
    pub biography: Option<String>,
}
