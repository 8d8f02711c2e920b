//! End-to-end task flows against a mocked note server.
//!
//! These tests require the `mock_remote_source` Cargo feature (pulled in by
//! `integration_tests`); without it they print a warning and do nothing.

#[cfg(feature = "mock_remote_source")]
use planer_client::{
    mock_behaviour::MockBehaviour,
    mock_source::MockSource,
    wire, DateKey, NewTask, Provider, Task, TaskPatch,
};
#[cfg(feature = "mock_remote_source")]
use std::sync::{Arc, Mutex};

/// A test that walks one user session through the whole task lifecycle:
/// fetch, create, toggle, edit, delete.
struct TestFlavour {
    #[cfg(feature = "mock_remote_source")]
    behaviour: MockBehaviour,
}

impl TestFlavour {
    #[cfg(not(feature = "mock_remote_source"))]
    pub fn calm_server() -> Self { Self {} }
    #[cfg(not(feature = "mock_remote_source"))]
    pub fn flaky_server() -> Self { Self {} }

    #[cfg(feature = "mock_remote_source")]
    pub fn calm_server() -> Self {
        Self {
            behaviour: MockBehaviour::new(),
        }
    }

    /// Every operation fails once before succeeding
    #[cfg(feature = "mock_remote_source")]
    pub fn flaky_server() -> Self {
        Self {
            behaviour: MockBehaviour {
                // The initial fetch is left alone so the session can start
                create_note_behaviour: (0, 1),
                update_note_behaviour: (0, 1),
                delete_note_behaviour: (0, 1),
                ..MockBehaviour::default()
            },
        }
    }

    #[cfg(not(feature = "mock_remote_source"))]
    pub async fn run(&self) {
        println!("WARNING: This test requires the \"integration_tests\" Cargo feature");
    }

    #[cfg(feature = "mock_remote_source")]
    pub async fn run(&self) {
        let day: DateKey = "2024-05-01".parse().unwrap();
        let other_day: DateKey = "2024-05-02".parse().unwrap();

        // The server already knows three notes from a previous session
        let source = MockSource::with_behaviour(Arc::new(Mutex::new(self.behaviour.clone())));
        for (id, title, date) in &[("1", "groceries", &day), ("2", "dentist", &day), ("3", "taxes", &other_day)] {
            let task = Task::new(id.to_string(), NewTask::new(*title).unwrap());
            source.seed_note(id, wire::note_payload(&task, *date));
        }
        let mut provider = Provider::new(source);

        // Fetch everything, then re-fetch one day: no duplicates may appear
        assert_eq!(provider.fetch_tasks(None).await.unwrap(), 3);
        assert_eq!(provider.fetch_tasks(Some(&day)).await.unwrap(), 0);
        assert_eq!(provider.store().tasks_for(&day).len(), 2);
        assert_eq!(provider.store().tasks_for(&other_day).len(), 1);

        // Create a task. On the flaky flavour the first attempt fails,
        // leaves no trace, and is retried
        let draft = NewTask::new("water the plants").unwrap().category("home");
        let mut created = provider.create_task(&day, draft.clone()).await;
        if created.is_none() {
            assert_eq!(provider.store().tasks_for(&day).len(), 2);
            created = provider.create_task(&day, draft).await;
        }
        let created = created.expect("the second attempt runs against a healed server");
        assert_eq!(provider.store().tasks_for(&day).len(), 3);
        assert_eq!(provider.store().task(&day, &created).unwrap().category(), "home");

        // Toggle twice: a failed toggle must not flip the local flag
        provider.toggle_task(&day, "1").await;
        provider.toggle_task(&day, "1").await;
        let done = provider.store().task(&day, "1").unwrap().done();
        match self.behaviour.update_note_behaviour {
            (0, 0) => assert_eq!(done, false), // both toggles went through
            _ => assert_eq!(done, true),       // the first one was dropped by the server
        }

        // Edit, then delete, on the other day
        let patch = TaskPatch {
            title: Some("file the taxes".to_string()),
            ..TaskPatch::default()
        };
        provider.save_task_edit(&other_day, "3", patch.clone()).await;
        if provider.store().task(&other_day, "3").unwrap().title() == "taxes" {
            // First attempt hit the flaky failure; retry
            provider.save_task_edit(&other_day, "3", patch).await;
        }
        assert_eq!(provider.store().task(&other_day, "3").unwrap().title(), "file the taxes");

        if provider.delete_task(&other_day, "3").await == false {
            assert_eq!(provider.store().tasks_for(&other_day).len(), 1);
            assert!(provider.delete_task(&other_day, "3").await);
        }
        assert!(provider.store().tasks_for(&other_day).is_empty());

        // The local store and the mock server agree at the end of the session
        assert_eq!(provider.store().task_count(), provider.source().note_count());
    }
}

#[tokio::test]
async fn test_full_session_against_a_calm_server() {
    let _ = env_logger::builder().is_test(true).try_init();

    let flavour = TestFlavour::calm_server();
    flavour.run().await;
}

#[tokio::test]
async fn test_full_session_against_a_flaky_server() {
    let _ = env_logger::builder().is_test(true).try_init();

    let flavour = TestFlavour::flaky_server();
    flavour.run().await;
}
