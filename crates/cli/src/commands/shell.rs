// Path: crates/cli/src/commands/shell.rs

//! The interactive session. Holds one [`AppContext`] and the view-model of every screen
//! the user has opened, and drives them from line commands read on stdin.

use super::{print_bundles, print_courses, print_effect};
use anyhow::{anyhow, Context, Result};
use learnchain_app::screens::bundle::{BundleScreen, CourseStatus};
use learnchain_app::screens::connect::ConnectScreen;
use learnchain_app::screens::course::CourseScreen;
use learnchain_app::screens::home::HomeScreen;
use learnchain_app::screens::learn::LearnScreen;
use learnchain_app::screens::my_courses::MyCoursesScreen;
use learnchain_app::screens::organization::OrganizationScreen;
use learnchain_app::screens::profile::ProfileScreen;
use learnchain_app::screens::quiz::FinalTestScreen;
use learnchain_app::screens::{auth, search::SearchScreen};
use learnchain_app::{reconcile_pending, AppContext, Effect, Route, ViewState};
use learnchain_types::AvatarUpload;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  login <email> <password>        signup <name> <email> <password>
  logout                          whoami
  home | more | less              search <query...>
  course <id>                     join
  org <id>                        bundle <id>
  certificate                     learn <course-id>
  complete <document-id>          quiz
  answer <question-id> <option-id>
  submit                          my-courses [filter] [title...]
  profile                         profile set <name|email|birthday|phone> <value...>
  profile avatar <file>           profile save
  certificates more               wallet <connect|disconnect|total>
  reconcile                       help | quit";

enum Flow {
    Continue,
    Quit,
}

struct Shell {
    ctx: AppContext,
    home: HomeScreen,
    course: Option<CourseScreen>,
    bundle: Option<BundleScreen>,
    learn: Option<LearnScreen>,
    quiz: Option<FinalTestScreen>,
    my_courses: MyCoursesScreen,
    profile: ProfileScreen,
    connect: ConnectScreen,
}

pub async fn run(ctx: AppContext) -> Result<()> {
    let mut shell = Shell {
        home: HomeScreen::for_context(&ctx),
        profile: ProfileScreen::for_context(&ctx),
        course: None,
        bundle: None,
        learn: None,
        quiz: None,
        my_courses: MyCoursesScreen::new(),
        connect: ConnectScreen::new(),
        ctx,
    };
    println!("learnchain shell. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match shell.execute(line.trim()).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => println!("error: {:#}", e),
        }
    }
    Ok(())
}

impl Shell {
    async fn execute(&mut self, line: &str) -> Result<Flow> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = words.collect();

        match (command, args.as_slice()) {
            ("help", _) => println!("{}", HELP),
            ("quit" | "exit", _) => return Ok(Flow::Quit),

            ("login", [email, password]) => {
                let effect = auth::login(&mut self.ctx, email, password).await;
                self.follow(effect).await;
                self.profile.reset_form(&self.ctx);
            }
            ("signup", [name @ .., email, password]) if !name.is_empty() => {
                let effect = auth::signup(&mut self.ctx, &name.join(" "), email, password).await;
                self.follow(effect).await;
            }
            ("logout", []) => {
                let effect = auth::logout(&mut self.ctx).await;
                self.follow(effect).await;
            }
            ("whoami", []) => self.whoami(),

            ("home", []) => {
                self.home.load(&self.ctx).await;
                self.show_home();
            }
            ("more", []) => {
                self.home.show_more_courses(&self.ctx).await;
                self.home.show_more_bundles(&self.ctx).await;
                self.show_home();
            }
            ("less", []) => {
                self.home.show_less_courses(&self.ctx).await;
                self.home.show_less_bundles(&self.ctx).await;
                self.show_home();
            }
            ("search", words) if !words.is_empty() => {
                let mut page = SearchScreen::new(&self.ctx, words.join(" "));
                page.load(&self.ctx).await;
                let results = page.visible();
                print_courses(&results.courses);
                print_bundles(&results.bundles);
            }

            ("course", [id]) => self.open_course(id).await,
            ("join", []) => {
                let screen = self
                    .course
                    .as_mut()
                    .ok_or_else(|| anyhow!("open a course first"))?;
                let effect = screen.join(&mut self.ctx).await;
                self.follow(effect).await;
            }
            ("org", [id]) => {
                let mut screen = OrganizationScreen::new(*id);
                screen.load(&self.ctx).await;
                match &screen.state {
                    ViewState::Loaded(org) => {
                        println!("{} <{}>", org.name, org.email);
                        println!("  {}", org.address);
                        if let Some(wallet) = org.payment_address() {
                            println!("  wallet: {}", wallet);
                        }
                    }
                    ViewState::Failed(reason) => println!("failed to load: {}", reason),
                    ViewState::Loading => {}
                }
            }
            ("bundle", [id]) => self.open_bundle(id).await,
            ("certificate", []) => {
                let screen = self
                    .bundle
                    .as_mut()
                    .ok_or_else(|| anyhow!("open a bundle first"))?;
                let effect = screen.request_certificate(&mut self.ctx).await;
                print_effect(&effect);
            }

            ("learn", [id]) => self.open_learn(id, false).await,
            ("complete", [document]) => {
                let screen = self
                    .learn
                    .as_mut()
                    .ok_or_else(|| anyhow!("open a course with `learn` first"))?;
                let effect = screen.complete_lesson(&mut self.ctx, document).await;
                print_effect(&effect);
            }
            ("quiz", []) => {
                let screen = self
                    .learn
                    .as_ref()
                    .ok_or_else(|| anyhow!("open a course with `learn` first"))?;
                let effect = screen.start_quiz(&self.ctx.session);
                if effect.navigate.is_none() {
                    println!("Finish every lesson first.");
                }
                self.follow(effect).await;
            }
            ("answer", [question, option]) => {
                let quiz = self
                    .quiz
                    .as_mut()
                    .ok_or_else(|| anyhow!("start a quiz first"))?;
                quiz.select(question, option);
            }
            ("submit", []) => {
                let quiz = self
                    .quiz
                    .as_mut()
                    .ok_or_else(|| anyhow!("start a quiz first"))?;
                let effect = quiz.submit(&mut self.ctx).await;
                if let Some(result) = &quiz.last_result {
                    println!("Score: {:.0}", result.score);
                }
                self.follow(effect).await;
            }

            ("my-courses", rest) => {
                let (filter, query) = match rest.split_first() {
                    Some((first, tail)) => match first.parse() {
                        Ok(filter) => (filter, tail.join(" ")),
                        Err(_) => (Default::default(), rest.join(" ")),
                    },
                    None => (Default::default(), String::new()),
                };
                self.my_courses.filter = filter;
                self.my_courses.query = query;
                self.my_courses.load(&self.ctx).await;
                if let Some(reason) = self.my_courses.state.error() {
                    println!("failed to load: {}", reason);
                }
                for detail in self.my_courses.visible() {
                    let mark = if detail.completed { "done" } else { "    " };
                    println!("  [{}] {:>5.1}%  {}", mark, detail.progress, detail.title());
                }
            }

            ("profile", []) => {
                self.profile.load(&self.ctx).await;
                self.show_profile();
            }
            ("profile", ["set", field, value @ ..]) if !value.is_empty() => {
                let value = value.join(" ");
                match *field {
                    "name" => self.profile.form.name = value,
                    "email" => self.profile.form.email = value,
                    "birthday" => self.profile.form.birthday = Some(value),
                    "phone" => self.profile.form.numberphone = Some(value),
                    other => return Err(anyhow!("unknown profile field '{}'", other)),
                }
            }
            ("profile", ["avatar", path]) => {
                let avatar = read_avatar(Path::new(path)).await?;
                self.profile.set_avatar(avatar);
            }
            ("profile", ["save"]) => {
                let effect = self.profile.submit(&mut self.ctx).await;
                print_effect(&effect);
            }
            ("certificates", ["more"]) => {
                self.profile.show_more();
                self.show_profile();
            }

            ("wallet", ["connect"]) => {
                let effect = self.connect.connect(&mut self.ctx).await;
                print_effect(&effect);
                if let Some(address) = self.connect.address(&self.ctx) {
                    println!("Connected: {}", address);
                }
            }
            ("wallet", ["disconnect"]) => {
                let effect = self.connect.disconnect(&mut self.ctx).await;
                print_effect(&effect);
            }
            ("wallet", ["total"]) => {
                self.connect.read_total_certificates(&self.ctx).await;
                match &self.connect.total_certificates {
                    ViewState::Loaded(total) => println!("Certificates issued on chain: {}", total),
                    ViewState::Failed(reason) => println!("failed to read: {}", reason),
                    ViewState::Loading => {}
                }
            }

            ("reconcile", []) => {
                let report = reconcile_pending(&mut self.ctx).await?;
                println!(
                    "Enrolled: {}  Still pending: {}  Reverted: {}",
                    report.enrolled.len(),
                    report.still_pending.len(),
                    report.reverted.len()
                );
            }

            _ => println!("Unrecognized command. Type `help`."),
        }
        Ok(Flow::Continue)
    }

    /// Prints the effect and opens the screens the shell can show.
    async fn follow(&mut self, effect: Effect) {
        print_effect(&effect);
        match effect.navigate {
            Some(Route::LearnCourse { id, reload }) => self.open_learn(&id, reload).await,
            Some(Route::FinalTest { course_id }) => {
                let mut quiz = FinalTestScreen::new(course_id);
                quiz.load(&self.ctx).await;
                if let Some(final_quiz) = quiz.quiz() {
                    println!("{}", final_quiz.title);
                    for question in &final_quiz.questions {
                        println!("  {} [{}]", question.question_text, question.id);
                        for option in &question.options {
                            println!("      - {} [{}]", option.text, option.id);
                        }
                    }
                }
                self.quiz = Some(quiz);
            }
            Some(Route::CourseDetail { id }) => self.open_course(&id).await,
            Some(Route::BundleDetail { id }) => self.open_bundle(&id).await,
            _ => {}
        }
    }

    fn whoami(&self) {
        match self.ctx.session.user() {
            Some(user) => {
                println!("{} <{}> ({})", user.name, user.email, user.id);
                println!(
                    "  wallet: {}",
                    self.ctx.session.wallet_address().unwrap_or("none")
                );
                println!(
                    "  enrollments: {}  certificates: {}",
                    user.enrollments.len(),
                    user.certificates.len()
                );
            }
            None => println!("Not logged in."),
        }
    }

    fn show_home(&self) {
        match &self.home.state {
            ViewState::Loaded(catalog) => {
                println!("Courses ({} of {}):", catalog.courses.len(), catalog.total_courses);
                print_courses(&catalog.courses);
                println!("Bundles ({} of {}):", catalog.bundles.len(), catalog.total_bundles);
                print_bundles(&catalog.bundles);
            }
            ViewState::Failed(reason) => println!("failed to load: {}", reason),
            ViewState::Loading => {}
        }
    }

    fn show_profile(&self) {
        if let Some(reason) = self.profile.certificates.error() {
            println!("failed to load certificates: {}", reason);
        }
        println!("Certificates:");
        for cert in self.profile.visible_certificates() {
            let target = cert.course.as_deref().or(cert.bundle.as_deref()).unwrap_or("-");
            println!("  {}  {}", cert.id, target);
        }
        if self.profile.can_show_more() {
            println!("  ... `certificates more` for the rest");
        }
    }

    async fn open_course(&mut self, id: &str) {
        let mut screen = CourseScreen::new(id);
        screen.load(&self.ctx).await;
        match &screen.state {
            ViewState::Loaded(course) => {
                println!("{} ({:.2})", course.title, course.price);
                println!("  by {}", course.organization.name());
                println!("  [{}]", screen.join_label(&self.ctx.session));
            }
            ViewState::Failed(reason) => println!("failed to load: {}", reason),
            ViewState::Loading => {}
        }
        self.course = Some(screen);
    }

    async fn open_bundle(&mut self, id: &str) {
        let mut screen = BundleScreen::new(id);
        screen.load(&self.ctx).await;
        match &screen.state {
            ViewState::Loaded(bundle) => {
                println!("{}", bundle.title);
                for course in &bundle.courses {
                    let status = match screen.course_status(&self.ctx.session, &course.id) {
                        CourseStatus::Completed => "completed",
                        CourseStatus::InProgress => "in progress",
                        CourseStatus::NotEnrolled => "not enrolled",
                    };
                    println!("  {:<26} {}  ({})", course.id, course.title, status);
                }
                println!("  [{}]", screen.certificate_label(&self.ctx.session));
            }
            ViewState::Failed(reason) => println!("failed to load: {}", reason),
            ViewState::Loading => {}
        }
        self.bundle = Some(screen);
    }

    async fn open_learn(&mut self, id: &str, reload: bool) {
        let mut screen = LearnScreen::new(id, reload);
        screen.load(&self.ctx).await;
        match &screen.state {
            ViewState::Loaded(course) => {
                println!("{}", course.title);
                for doc in &course.documents {
                    let mark = if screen.is_lesson_complete(&self.ctx.session, &doc.id) {
                        "x"
                    } else {
                        " "
                    };
                    println!("  [{}] {}  [{}]", mark, doc.title, doc.id);
                }
                for attempt in &screen.quiz_results {
                    println!("  attempt: {:.0}", attempt.score);
                }
                println!("  [{}]", screen.quiz_label(&self.ctx.session));
            }
            ViewState::Failed(reason) => println!("failed to load: {}", reason),
            ViewState::Loading => {}
        }
        self.learn = Some(screen);
    }
}

async fn read_avatar(path: &Path) -> Result<AvatarUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("'{}' has no file name", path.display()))?
        .to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let mime_type = match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };
    Ok(AvatarUpload {
        file_name,
        mime_type: mime_type.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn avatar_type_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Me.JPG");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let avatar = read_avatar(&path).await.unwrap();
        assert_eq!(avatar.file_name, "Me.JPG");
        assert_eq!(avatar.mime_type, "image/jpeg");
        assert_eq!(avatar.bytes, vec![1, 2, 3]);
    }
}
