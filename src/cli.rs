use crate::accounts::Registration;
use crate::campaigns::NewProject;
use crate::error::CrowdfundError;
use crate::journal::Journal;
use crate::session::Session;
use crate::store::Store;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub struct Context {
    pub store: Store,
    pub session: Session,
    pub journal: Option<Journal>,
    pub currency: String,
}

/// Source of typed lines. `None` means the user closed input (Ctrl-C/Ctrl-D).
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Whether the outer loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Read one field, bailing out of the current menu on closed input.
macro_rules! field {
    ($input:expr, $prompt:expr) => {
        match $input.read_line($prompt)? {
            Some(line) => line,
            None => return Ok(Flow::Quit),
        }
    };
}

impl Context {
    /// Write a journal event; failures only warn.
    fn note<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Journal) -> Result<()>,
    {
        if let Some(journal) = self.journal.as_mut() {
            if let Err(e) = f(journal) {
                eprintln!("Warning: failed to write journal: {}", e);
            }
        }
    }

    /// Print an operation error. Storage failures are also journaled.
    fn report(&mut self, operation: &str, err: &CrowdfundError) {
        if err.is_storage() {
            eprintln!("\nCould not save data: {}", err);
            let msg = err.to_string();
            self.note(|j| j.store_error(operation, &msg));
        } else {
            println!("\n{}", err);
        }
    }
}

pub fn run_repl(mut ctx: Context) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    run(&mut ctx, &mut rl)
}

/// Drive the start menu until the user exits or input closes.
pub fn run(ctx: &mut Context, input: &mut dyn LineSource) -> Result<()> {
    loop {
        println!("\nCrowdfunding Console App Start Menu");
        println!("------------------------------------");
        println!("\n1. Register.");
        println!("2. Login.");
        println!("3. Exit.");

        let Some(choice) = input.read_line("\nEnter choice : ")? else {
            break;
        };

        let flow = match choice.trim() {
            "1" => register(ctx, input)?,
            "2" => match login(ctx, input)? {
                Flow::Continue if ctx.session.email().is_some() => member_menu(ctx, input)?,
                flow => flow,
            },
            "3" => {
                println!("\nExiting the program...");
                Flow::Quit
            }
            _ => {
                println!("\nInvalid choice!");
                Flow::Continue
            }
        };

        if flow == Flow::Quit {
            break;
        }
    }

    Ok(())
}

fn register(ctx: &mut Context, input: &mut dyn LineSource) -> Result<Flow> {
    println!("\n\nRegister");
    println!("-----------");
    let form = Registration {
        first_name: field!(input, "First Name : "),
        last_name: field!(input, "Last Name : "),
        email: field!(input, "Email : "),
        password: field!(input, "Password : "),
        confirm_password: field!(input, "Confirm Password : "),
        phone: field!(input, "Mobile Phone : "),
    };
    let email = form.email.clone();

    let outcome = ctx.store.register(form).map(|_| ());
    match outcome {
        Ok(()) => {
            println!("\nRegistration successful!");
            ctx.note(|j| j.user_registered(&email));
        }
        Err(e) => {
            ctx.report("register", &e);
            if !e.is_storage() {
                ctx.note(|j| j.register_rejected(&email, e.code()));
            }
        }
    }
    Ok(Flow::Continue)
}

fn login(ctx: &mut Context, input: &mut dyn LineSource) -> Result<Flow> {
    println!("\n\nLogin");
    println!("------");
    let email = field!(input, "Email : ");
    let password = field!(input, "Password : ");

    match ctx.store.login(&email, &password) {
        Ok(identity) => {
            println!("\nLogin successful!");
            println!("\nWelcome, {} !", identity);
            ctx.note(|j| j.login_ok(&identity));
            ctx.session.login(identity);
        }
        Err(e) => {
            println!("\n{}", e);
            ctx.note(|j| j.login_failed(&email));
        }
    }
    Ok(Flow::Continue)
}

/// The authenticated menu. Returns `Continue` on logout.
fn member_menu(ctx: &mut Context, input: &mut dyn LineSource) -> Result<Flow> {
    let Some(email) = ctx.session.email().map(str::to_string) else {
        return Ok(Flow::Continue);
    };

    loop {
        println!("\n\n#################################################");
        println!("\n\nChoose what do you want to do from this menu");
        println!("----------------------------------------------");
        println!("\n1. Create Project.");
        println!("2. View Projects.");
        println!("3. Edit My Project.");
        println!("4. Delete My Project.");
        println!("5. Search Project by Date.");
        println!("6. Logout.");

        let choice = field!(input, "\nEnter choice : ");
        let flow = match choice.trim() {
            "1" => create_project(ctx, input, &email)?,
            "2" => {
                view_projects(ctx);
                Flow::Continue
            }
            "3" => edit_project(ctx, input, &email)?,
            "4" => delete_project(ctx, input, &email)?,
            "5" => search_projects(ctx, input)?,
            "6" => {
                println!("\nLogging out...");
                if let Some(who) = ctx.session.logout() {
                    ctx.note(|j| j.logout(&who));
                }
                return Ok(Flow::Continue);
            }
            _ => {
                println!("\nInvalid choice!");
                Flow::Continue
            }
        };

        if flow == Flow::Quit {
            return Ok(Flow::Quit);
        }
    }
}

fn create_project(ctx: &mut Context, input: &mut dyn LineSource, owner: &str) -> Result<Flow> {
    println!("\n\nCreate Project");
    println!("------------------");
    let draft = NewProject {
        title: field!(input, "Title : "),
        details: field!(input, "Details : "),
        target: field!(input, "Total Target Amount : "),
        start_date: field!(input, "Start Date (YYYY-MM-DD) : "),
        end_date: field!(input, "End Date (YYYY-MM-DD) : "),
    };
    let title = draft.title.clone();

    let outcome = ctx.store.create_project(owner, draft).map(|_| ());
    match outcome {
        Ok(()) => {
            println!("\nProject created successfully!");
            ctx.note(|j| j.project_created(owner, &title));
        }
        Err(e) => {
            ctx.report("create_project", &e);
            if !e.is_storage() {
                ctx.note(|j| j.project_rejected(owner, &title, e.code()));
            }
        }
    }
    Ok(Flow::Continue)
}

/// Listing lines for every project, in insertion order.
pub fn project_listing(store: &Store, currency: &str) -> Vec<String> {
    store
        .projects()
        .iter()
        .map(|p| p.format_listing(currency))
        .collect()
}

fn view_projects(ctx: &Context) {
    println!("\n\nAll Projects");
    println!("-------------");
    let lines = project_listing(&ctx.store, &ctx.currency);
    if lines.is_empty() {
        println!("\nYou don't have any added projects yet.");
    }
    for line in lines {
        println!("{}", line);
    }
}

fn edit_project(ctx: &mut Context, input: &mut dyn LineSource, owner: &str) -> Result<Flow> {
    println!("\nEdit Project");
    println!("-------------");
    let title = field!(input, "Enter the project title to edit : ");

    // Only ask for new details once the caller is known to own the project
    let owned = ctx.store.owned_project(&title, owner).map(|_| ());
    if let Err(e) = owned {
        println!("\n{}", e);
        ctx.note(|j| j.project_denied(owner, &title, "edit"));
        return Ok(Flow::Continue);
    }
    let details = field!(input, "New Details : ");

    match ctx.store.edit_project(&title, owner, details) {
        Ok(()) => {
            println!("\nProject updated!");
            ctx.note(|j| j.project_updated(owner, &title));
        }
        Err(e) => ctx.report("edit_project", &e),
    }
    Ok(Flow::Continue)
}

fn delete_project(ctx: &mut Context, input: &mut dyn LineSource, owner: &str) -> Result<Flow> {
    println!("\nDelete Project");
    println!("-------------");
    let title = field!(input, "Enter the project title to delete : ");

    match ctx.store.delete_project(&title, owner) {
        Ok(_) => {
            println!("\nProject deleted!");
            ctx.note(|j| j.project_deleted(owner, &title));
        }
        Err(CrowdfundError::NotFoundOrNotOwned) => {
            println!("\n{}", CrowdfundError::NotFoundOrNotOwned);
            ctx.note(|j| j.project_denied(owner, &title, "delete"));
        }
        Err(e) => ctx.report("delete_project", &e),
    }
    Ok(Flow::Continue)
}

fn search_projects(ctx: &mut Context, input: &mut dyn LineSource) -> Result<Flow> {
    println!("\nSearch Projects by Date");
    println!("-------------------------");
    let date = field!(input, "Enter date (YYYY-MM-DD) : ");

    let found = match ctx.store.search_by_date(&date) {
        Ok(matches) => {
            if matches.is_empty() {
                println!("\nThere is no project found for this date.");
            }
            for p in &matches {
                println!("{}", p.format_match(&ctx.currency));
            }
            Some(matches.len())
        }
        Err(e) => {
            println!("\n{}", e);
            None
        }
    };
    ctx.note(|j| j.search(&date, found));
    Ok(Flow::Continue)
}
