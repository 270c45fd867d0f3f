//! Project CRUD and the date search.
//!
//! Lookups by title take the first match in insertion order. Edit and delete
//! only consider projects owned by the acting user, so a title that exists
//! under someone else's account looks exactly like a missing one.

use crate::error::{CrowdfundError, CrowdfundResult};
use crate::model::Project;
use crate::store::Store;
use crate::validation::{parse_date, parse_date_range};

/// Raw create-project input.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub title: String,
    pub details: String,
    pub target: String,
    pub start_date: String,
    pub end_date: String,
}

impl Store {
    /// Validate the date window and append a project owned by `owner`.
    pub fn create_project(
        &mut self,
        owner: &str,
        draft: NewProject,
    ) -> CrowdfundResult<&Project> {
        let (start_date, end_date) = parse_date_range(&draft.start_date, &draft.end_date)?;

        self.projects_mut().push(Project {
            title: draft.title,
            details: draft.details,
            target: draft.target,
            start_date,
            end_date,
            owner: owner.to_string(),
        });
        self.save()?;

        let projects = self.projects();
        Ok(&projects[projects.len() - 1])
    }

    fn owned_index(&self, title: &str, owner: &str) -> CrowdfundResult<usize> {
        self.projects()
            .iter()
            .position(|p| p.title == title && p.is_owned_by(owner))
            .ok_or(CrowdfundError::NotFoundOrNotOwned)
    }

    /// The project `owner` may edit or delete under `title`.
    pub fn owned_project(&self, title: &str, owner: &str) -> CrowdfundResult<&Project> {
        let idx = self.owned_index(title, owner)?;
        Ok(&self.projects()[idx])
    }

    /// Replace the details of the first matching owned project.
    pub fn edit_project(
        &mut self,
        title: &str,
        owner: &str,
        details: String,
    ) -> CrowdfundResult<()> {
        let idx = self.owned_index(title, owner)?;
        self.projects_mut()[idx].details = details;
        self.save()
    }

    /// Remove the first matching owned project and return it.
    pub fn delete_project(&mut self, title: &str, owner: &str) -> CrowdfundResult<Project> {
        let idx = self.owned_index(title, owner)?;
        let removed = self.projects_mut().remove(idx);
        self.save()?;
        Ok(removed)
    }

    /// Every project whose window contains `date`, both ends inclusive.
    pub fn search_by_date(&self, date: &str) -> CrowdfundResult<Vec<&Project>> {
        let date = parse_date(date)?;
        Ok(self.projects().iter().filter(|p| p.runs_on(date)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ALICE: &str = "alice@example.com";
    const BOB: &str = "bob@example.com";

    fn draft(title: &str, start: &str, end: &str) -> NewProject {
        NewProject {
            title: title.to_string(),
            details: format!("{} details", title),
            target: "1000".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    fn store(dir: &TempDir) -> Store {
        Store::empty(&dir.path().join("db.json"))
    }

    #[test]
    fn test_create_project() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let p = store
            .create_project(ALICE, draft("P1", "2024-1-1", "2024-01-10"))
            .unwrap();
        assert_eq!(p.owner, ALICE);
        assert_eq!(p.start_date.to_string(), "2024-01-01");

        let (reloaded, _) = Store::load(store.path()).unwrap();
        assert_eq!(reloaded.projects().len(), 1);
    }

    #[test]
    fn test_create_rejects_bad_dates() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);

        let err = store
            .create_project(ALICE, draft("P", "2024-02-01", "2024-01-01"))
            .unwrap_err();
        assert!(matches!(err, CrowdfundError::InvalidDateRange));

        let err = store
            .create_project(ALICE, draft("P", "01-01-2024", "2024-01-10"))
            .unwrap_err();
        assert!(matches!(err, CrowdfundError::InvalidDateFormat));

        assert!(store.projects().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_target_is_free_text() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        let p = store
            .create_project(
                ALICE,
                NewProject {
                    target: "about a million".to_string(),
                    ..draft("P", "2024-01-01", "2024-01-02")
                },
            )
            .unwrap();
        assert_eq!(p.target, "about a million");
    }

    #[test]
    fn test_edit_requires_owner() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        store
            .create_project(ALICE, draft("P1", "2024-01-01", "2024-01-31"))
            .unwrap();

        let err = store
            .edit_project("P1", BOB, "hijacked".to_string())
            .unwrap_err();
        assert!(matches!(err, CrowdfundError::NotFoundOrNotOwned));
        let err = store
            .edit_project("Nope", ALICE, "x".to_string())
            .unwrap_err();
        assert!(matches!(err, CrowdfundError::NotFoundOrNotOwned));
        assert_eq!(store.projects()[0].details, "P1 details");

        store
            .edit_project("P1", ALICE, "new plan".to_string())
            .unwrap();
        assert_eq!(store.projects()[0].details, "new plan");
    }

    #[test]
    fn test_edit_picks_first_owned_match() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        store
            .create_project(BOB, draft("Same", "2024-01-01", "2024-01-31"))
            .unwrap();
        store
            .create_project(ALICE, draft("Same", "2024-01-01", "2024-01-31"))
            .unwrap();
        store
            .create_project(ALICE, draft("Same", "2024-03-01", "2024-03-31"))
            .unwrap();

        store.edit_project("Same", ALICE, "edited".to_string()).unwrap();
        let details: Vec<_> = store.projects().iter().map(|p| p.details.as_str()).collect();
        assert_eq!(details, vec!["Same details", "edited", "Same details"]);
    }

    #[test]
    fn test_delete_requires_owner() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        store
            .create_project(ALICE, draft("P1", "2024-01-01", "2024-01-31"))
            .unwrap();
        store
            .create_project(BOB, draft("P2", "2024-01-01", "2024-01-31"))
            .unwrap();

        assert!(matches!(
            store.delete_project("P2", ALICE),
            Err(CrowdfundError::NotFoundOrNotOwned)
        ));
        assert_eq!(store.projects().len(), 2);

        let removed = store.delete_project("P1", ALICE).unwrap();
        assert_eq!(removed.title, "P1");
        let (reloaded, _) = Store::load(store.path()).unwrap();
        assert_eq!(reloaded.projects().len(), 1);
        assert_eq!(reloaded.projects()[0].title, "P2");
    }

    #[test]
    fn test_owned_project_lookup() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        store
            .create_project(ALICE, draft("P1", "2024-01-01", "2024-01-31"))
            .unwrap();
        assert!(store.owned_project("P1", ALICE).is_ok());
        assert!(store.owned_project("P1", BOB).is_err());
    }

    #[test]
    fn test_search_inclusive() {
        let dir = TempDir::new().unwrap();
        let mut store = store(&dir);
        store
            .create_project(ALICE, draft("Jan", "2024-01-01", "2024-01-31"))
            .unwrap();
        store
            .create_project(BOB, draft("Feb", "2024-02-01", "2024-02-29"))
            .unwrap();
        store
            .create_project(BOB, draft("Q1", "2024-01-15", "2024-03-31"))
            .unwrap();

        let titles = |date: &str| -> Vec<String> {
            store
                .search_by_date(date)
                .unwrap()
                .into_iter()
                .map(|p| p.title.clone())
                .collect()
        };

        assert_eq!(titles("2024-01-01"), vec!["Jan"]);
        assert_eq!(titles("2024-01-31"), vec!["Jan", "Q1"]);
        assert_eq!(titles("2024-02-01"), vec!["Feb", "Q1"]);
        assert_eq!(titles("2024-03-31"), vec!["Q1"]);
        assert!(titles("2024-04-01").is_empty());
        assert!(titles("2023-12-31").is_empty());
    }

    #[test]
    fn test_search_bad_date() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(matches!(
            store.search_by_date("31/01/2024"),
            Err(CrowdfundError::InvalidDateFormat)
        ));
    }
}
