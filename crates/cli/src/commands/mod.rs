// Path: crates/cli/src/commands/mod.rs

pub mod catalog;
pub mod config;
pub mod shell;

use learnchain_app::{Effect, Notice};
use learnchain_types::{Bundle, Course};

/// Prints what an action asked for. The shell decides itself whether to follow the route.
pub fn print_effect(effect: &Effect) {
    match &effect.notice {
        Some(Notice::Alert { title, body }) => println!("[{}] {}", title, body),
        Some(Notice::Inline(message)) => println!("{}", message),
        None => {}
    }
    if let Some(route) = &effect.navigate {
        println!("-> {}", route);
    }
}

pub fn print_courses(courses: &[Course]) {
    for c in courses {
        println!(
            "  {:<26} {:>8.2}  {}  ({})",
            c.id,
            c.price,
            c.title,
            c.organization.name()
        );
    }
}

pub fn print_bundles(bundles: &[Bundle]) {
    for b in bundles {
        println!("  {:<26} {:>8.2}  {}  [{} courses]", b.id, b.price, b.title, b.courses.len());
    }
}
