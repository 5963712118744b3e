// Path: crates/app/tests/common/mod.rs
#![allow(dead_code)]

use learnchain_api::mock::{MemoryStorage, MockBackend, MockContractBridge, MockProvider, MockWalletConnector};
use learnchain_api::WalletConnector;
use learnchain_app::AppContext;
use learnchain_types::chain::Address;
use learnchain_types::config::ClientConfig;
use learnchain_types::{
    Bundle, Course, Document, Enrollment, FinalQuiz, Organization, OrganizationRef, Question,
    QuizOption, User,
};
use std::sync::Arc;

pub const STUDENT_WALLET: &str = "0x1111111111111111111111111111111111111111";
pub const ORG_WALLET: &str = "0x2222222222222222222222222222222222222222";
pub const TOKEN: &str = "token-u1";

pub struct Harness {
    pub backend: Arc<MockBackend>,
    pub contract: Arc<MockContractBridge>,
    pub storage: Arc<MemoryStorage>,
    pub ctx: AppContext,
}

fn build(backend: MockBackend, storage: MemoryStorage, wallet: Arc<dyn WalletConnector>) -> Harness {
    let backend = Arc::new(backend);
    let contract = Arc::new(MockContractBridge::new());
    let storage = Arc::new(storage);
    let ctx = AppContext::new(
        ClientConfig::default(),
        backend.clone(),
        contract.clone(),
        wallet,
        storage.clone(),
    );
    Harness {
        backend,
        contract,
        storage,
        ctx,
    }
}

fn student_address() -> Address {
    STUDENT_WALLET.parse().unwrap()
}

/// A logged-in student with a stored token and a connected wallet.
pub fn logged_in(backend: MockBackend, user: User) -> Harness {
    logged_in_with_storage(backend, user, MemoryStorage::with_token(TOKEN))
}

/// Like [`logged_in`], over a caller-prepared storage that should hold [`TOKEN`].
pub fn logged_in_with_storage(backend: MockBackend, user: User, storage: MemoryStorage) -> Harness {
    let wallet = Arc::new(MockWalletConnector::connected(
        student_address(),
        Arc::new(MockProvider::new()),
    ));
    let mut h = build(backend, storage, wallet);
    h.ctx.session.login(user);
    h
}

/// Nobody logged in, nothing stored, wallet not yet connected.
pub fn anonymous(backend: MockBackend) -> Harness {
    let wallet = Arc::new(MockWalletConnector::new(
        student_address(),
        Arc::new(MockProvider::new()),
    ));
    build(backend, MemoryStorage::default(), wallet)
}

pub fn student(wallet: Option<&str>) -> User {
    User {
        id: "u1".into(),
        name: "Ana".into(),
        email: "ana@example.com".into(),
        role: "customer".into(),
        wallet_address: wallet.map(str::to_string),
        enrollments: Vec::new(),
        certificates: Vec::new(),
        avt: None,
        birthday: None,
        numberphone: None,
    }
}

pub fn organization(id: &str, wallet: Option<&str>) -> Organization {
    Organization {
        id: id.into(),
        name: format!("Org {}", id),
        wallet_address: wallet.map(str::to_string),
        ..Organization::default()
    }
}

pub fn course(id: &str, price: f64, documents: &[&str]) -> Course {
    Course {
        id: id.into(),
        title: format!("Course {}", id),
        description: String::new(),
        price,
        image: None,
        organization: OrganizationRef::Populated(organization("o1", Some(ORG_WALLET))),
        documents: documents
            .iter()
            .map(|d| Document {
                id: d.to_string(),
                title: format!("Lesson {}", d),
                content: None,
            })
            .collect(),
        final_quiz: None,
    }
}

/// A course whose quiz has questions `q1..=qn`, each with options `qi-right` and `qi-wrong`.
pub fn course_with_quiz(id: &str, questions: usize) -> Course {
    let mut c = course(id, 0.0, &["d1"]);
    c.final_quiz = Some(FinalQuiz {
        title: "Final".into(),
        description: String::new(),
        questions: (1..=questions)
            .map(|i| Question {
                id: format!("q{}", i),
                question_text: format!("Question {}", i),
                options: vec![
                    QuizOption {
                        id: format!("q{}-right", i),
                        text: format!("right {}", i),
                    },
                    QuizOption {
                        id: format!("q{}-wrong", i),
                        text: format!("wrong {}", i),
                    },
                ],
            })
            .collect(),
    });
    c
}

pub fn bundle(id: &str, courses: Vec<Course>) -> Bundle {
    Bundle {
        id: id.into(),
        title: format!("Bundle {}", id),
        description: String::new(),
        image: None,
        price: 0.0,
        organization: OrganizationRef::Id("o1".into()),
        courses,
    }
}

pub fn enrollment(id: &str, course_id: &str, completed: bool) -> Enrollment {
    Enrollment {
        id: id.into(),
        user: Some("u1".into()),
        course: Some(course_id.into()),
        bundle: None,
        progress: if completed { 100.0 } else { 0.0 },
        completed_items: Vec::new(),
        completed,
    }
}
