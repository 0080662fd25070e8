//! Book entity.

/// A catalogued book. Belongs to exactly one author.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub genre: Option<String>,
    pub publication_year: i32,
    pub author_id: i64,
}

impl Book {
    pub fn new(
        id: i64,
        title: String,
        genre: Option<String>,
        publication_year: i32,
        author_id: i64,
    ) -> Self {
        Self {
            id,
            title,
            genre,
            publication_year,
            author_id,
        }
    }
}

/// Input data for creating or replacing a book.
///
/// `author_id` must reference a stored author; this is checked by the request
/// validation layer before the value reaches a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub genre: Option<String>,
    pub publication_year: i32,
    pub author_id: i64,
}
