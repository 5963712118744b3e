// Path: crates/cli/src/commands/catalog.rs

//! Read-only commands that need no login.

use super::{print_bundles, print_courses};
use anyhow::{anyhow, Result};
use learnchain_app::screens::home::HomeScreen;
use learnchain_app::screens::search::SearchScreen;
use learnchain_app::{AppContext, SearchOutcome, ViewState};
use learnchain_app::pricing::payment_amount;

pub async fn run_courses(ctx: &AppContext, limit: usize) -> Result<()> {
    let mut home = HomeScreen::new(limit.max(1));
    home.load(ctx).await;
    let catalog = match &home.state {
        ViewState::Loaded(catalog) => catalog,
        ViewState::Failed(reason) => return Err(anyhow!("failed to load catalog: {}", reason)),
        ViewState::Loading => return Ok(()),
    };

    println!("Courses ({} of {}):", catalog.courses.len(), catalog.total_courses);
    print_courses(&catalog.courses);
    println!("Bundles ({} of {}):", catalog.bundles.len(), catalog.total_bundles);
    print_bundles(&catalog.bundles);
    Ok(())
}

pub async fn run_course(ctx: &AppContext, id: &str) -> Result<()> {
    let course = ctx.backend.course(id).await?;
    let amount = payment_amount(course.price)?;

    println!("{} ({})", course.title, course.id);
    println!("  organization: {}", course.organization.name());
    println!("  price:        {:.2} ({})", course.price, amount);
    if !course.description.is_empty() {
        println!("  {}", course.description);
    }
    println!("Lessons:");
    for (i, doc) in course.documents.iter().enumerate() {
        println!("  {:>2}. {}  [{}]", i + 1, doc.title, doc.id);
    }
    if let Some(quiz) = &course.final_quiz {
        println!("Final quiz: {} ({} questions)", quiz.title, quiz.questions.len());
    }
    Ok(())
}

pub async fn run_search(ctx: &AppContext, query: &str, organization: Option<&str>) -> Result<()> {
    let mut page = SearchScreen::new(ctx, query);
    page.set_organization(organization);
    match page.load(ctx).await {
        SearchOutcome::Failed(reason) => return Err(anyhow!("search failed: {}", reason)),
        SearchOutcome::Cleared => {
            println!("Empty query.");
            return Ok(());
        }
        _ => {}
    }

    let results = page.visible();
    if results.is_empty() {
        println!("No results for {:?}.", query);
        return Ok(());
    }
    println!("Courses:");
    print_courses(&results.courses);
    println!("Bundles:");
    print_bundles(&results.bundles);
    Ok(())
}

pub async fn run_certificates_total(ctx: &AppContext) -> Result<()> {
    let total = ctx.contract.read_total_certificates().await?;
    println!("{}", total);
    Ok(())
}
