//! Static chapter catalog
//!
//! The catalog is fixed at build time. Tests may construct their own
//! (including degenerate chapters with zero pages or problems) through
//! [`Catalog::new`].

mod chapters;

pub use chapters::CHAPTERS;

/// Default minutes spent per page
pub const AVERAGE_READING_SPEED: f64 = 7.5;

/// Default minutes spent per problem
pub const AVERAGE_PROBLEM_TIME: f64 = 20.0;

/// Minutes budgeted for each chapter's multiple-choice quiz
pub const MCQ_QUIZ_TIME: u32 = 30;

/// Default study hours per day
pub const DEFAULT_DAILY_HOURS: f64 = 4.0;

/// One unit of the textbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chapter {
    /// 1-based, stable ordering
    pub id: u32,
    pub title: &'static str,
    pub pages: u32,
    pub problems: u32,
}

impl Chapter {
    /// Create a chapter entry
    pub const fn new(id: u32, title: &'static str, pages: u32, problems: u32) -> Self {
        Self { id, title, pages, problems }
    }
}

/// An ordered chapter list with derived totals
#[derive(Debug, Clone)]
pub struct Catalog {
    chapters: Vec<Chapter>,
    total_pages: u32,
    total_problems: u32,
}

impl Catalog {
    /// Build a catalog from an arbitrary chapter list
    pub fn new(chapters: Vec<Chapter>) -> Self {
        let total_pages = chapters.iter().map(|c| c.pages).sum();
        let total_problems = chapters.iter().map(|c| c.problems).sum();
        Self { chapters, total_pages, total_problems }
    }

    /// The built-in textbook
    pub fn builtin() -> Self {
        Self::new(CHAPTERS.to_vec())
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Find a chapter by id
    pub fn get(&self, id: u32) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_problems(&self) -> u32 {
        self.total_problems
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Id of the last chapter, if any
    pub fn last_id(&self) -> Option<u32> {
        self.chapters.last().map(|c| c.id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_thirty_chapters() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.chapter_count(), 30);
        assert_eq!(catalog.last_id(), Some(30));
    }

    #[test]
    fn builtin_ids_are_sequential() {
        let catalog = Catalog::builtin();
        for (index, chapter) in catalog.chapters().iter().enumerate() {
            assert_eq!(chapter.id as usize, index + 1);
            assert!(chapter.pages > 0);
            assert!(chapter.problems > 0);
        }
    }

    #[test]
    fn totals_are_sums() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.total_pages(), 1159);
        assert_eq!(catalog.total_problems(), 735);
    }

    #[test]
    fn get_finds_by_id() {
        let catalog = Catalog::builtin();
        let chapter = catalog.get(1).unwrap();
        assert_eq!(chapter.pages, 32);
        assert_eq!(chapter.problems, 13);
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(31).is_none());
    }

    #[test]
    fn custom_catalog_computes_totals() {
        let catalog =
            Catalog::new(vec![Chapter::new(1, "One", 10, 2), Chapter::new(2, "Two", 0, 3)]);
        assert_eq!(catalog.total_pages(), 10);
        assert_eq!(catalog.total_problems(), 5);
        assert!(catalog.contains(2));
    }
}
