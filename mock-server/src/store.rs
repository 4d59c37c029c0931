//! In-memory account, project and item data behind the mock endpoint.

use serde::Serialize;
use uuid::Uuid;

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_EMAIL: &str = "ada@example.com";
pub const TEST_PASSWORD: &str = "analytical";
pub const INBOX_ID: u64 = 1;

pub const TIMEZONES: &[(&str, &str)] = &[
    ("US/Hawaii", "(GMT-1000) Hawaii"),
    ("US/Pacific", "(GMT-0800) Pacific Time"),
    ("US/Eastern", "(GMT-0500) Eastern Time"),
    ("UTC", "(GMT+0000) UTC"),
    ("Europe/London", "(GMT+0000) London"),
    ("Europe/Copenhagen", "(GMT+0100) Copenhagen"),
    ("Asia/Tokyo", "(GMT+0900) Tokyo"),
];

#[derive(Clone, Debug, Serialize)]
pub struct Account {
    pub id: u64,
    pub email: String,
    pub full_name: String,
    pub timezone: String,
    pub api_token: String,
    #[serde(skip)]
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub color: u8,
    pub indent: u8,
}

#[derive(Clone, Debug, Serialize)]
pub struct Label {
    pub id: u64,
    pub name: String,
    pub color: u8,
}

#[derive(Clone, Debug, Serialize)]
pub struct Item {
    pub id: u64,
    pub project_id: u64,
    pub content: String,
    pub date_string: Option<String>,
    pub priority: i64,
    pub checked: bool,
}

#[derive(Debug, Default)]
pub struct Store {
    pub accounts: Vec<Account>,
    pub projects: Vec<Project>,
    pub labels: Vec<Label>,
    pub items: Vec<Item>,
    next_id: u64,
}

impl Store {
    /// One account (`TEST_TOKEN`), an Inbox with two open items and one
    /// completed item, and two labels.
    pub fn seeded() -> Self {
        let mut store = Store {
            next_id: 100,
            ..Store::default()
        };
        store.accounts.push(Account {
            id: 1,
            email: TEST_EMAIL.to_string(),
            full_name: "Ada Lovelace".to_string(),
            timezone: "Europe/London".to_string(),
            api_token: TEST_TOKEN.to_string(),
            password: TEST_PASSWORD.to_string(),
        });
        store.projects.push(Project {
            id: INBOX_ID,
            name: "Inbox".to_string(),
            color: 0,
            indent: 1,
        });
        store.labels.push(Label {
            id: 1,
            name: "errands".to_string(),
            color: 2,
        });
        store.labels.push(Label {
            id: 2,
            name: "work".to_string(),
            color: 5,
        });
        for (id, content, checked) in [
            (10, "Buy milk", false),
            (11, "Write report", false),
            (12, "Book flights", true),
        ] {
            store.items.push(Item {
                id,
                project_id: INBOX_ID,
                content: content.to_string(),
                date_string: None,
                priority: 1,
                checked,
            });
        }
        store
    }

    pub fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn account_by_token(&self, token: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.api_token == token)
    }

    pub fn project(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn item_mut(&mut self, id: u64) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn register(&mut self, email: &str, full_name: &str, password: &str, timezone: &str) -> Account {
        let account = Account {
            id: self.next_id(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            timezone: timezone.to_string(),
            api_token: Uuid::new_v4().simple().to_string(),
            password: password.to_string(),
        };
        self.accounts.push(account.clone());
        account
    }
}
