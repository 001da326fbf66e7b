//! Command implementations

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use spendwise_client::SpendwiseClient;
use spendwise_core::validation::{ExpenseForm, RegistrationForm};
use spendwise_core::{
    BudgetPolicy, Expense, ExpenseId, IdentityProvider, SpendError, SpendingSummary,
    UpdateExpense, User,
};
use spendwise_expenses::{ExpenseListController, LoadOutcome};
use spendwise_session::{SessionError, SessionManager};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::output;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the credentials and show who is signed in
    Login,
    /// Create an account
    Register(RegisterArgs),
    /// Show the signed-in user's profile
    Profile,
    /// List expenses, newest pages first
    List {
        /// Number of pages to fetch (default: all)
        #[arg(long)]
        pages: Option<u32>,
    },
    /// Record an expense
    Add(ExpenseArgs),
    /// Change an expense
    Edit {
        /// Expense ID
        id: String,
        #[command(flatten)]
        changes: ExpenseChanges,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
    /// Show one expense
    Show {
        /// Expense ID
        id: String,
    },
    /// Totals by category and against the budget
    Summary,
    /// Set the monthly budget
    Budget {
        /// New budget amount
        amount: String,
    },
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub username: String,
    /// Defaults to the password
    #[arg(long)]
    pub confirm_password: Option<String>,
    /// Starting budget
    #[arg(long)]
    pub budget: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExpenseArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub amount: String,
    #[arg(long)]
    pub category: String,
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Args, Debug, Default)]
pub struct ExpenseChanges {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }

    /// Overlay the changes on an existing expense as a full form, so edits
    /// go through the same validation as new entries.
    pub fn into_form(self, current: &Expense) -> ExpenseForm {
        ExpenseForm {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            amount: self.amount.unwrap_or_else(|| current.amount.to_string()),
            category: self.category.unwrap_or_else(|| current.category.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
        }
    }
}

/// Email and password as given on the command line or in the config
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn resolve(email: Option<String>, password: Option<String>, config: &AppConfig) -> Self {
        Self {
            email: email.or_else(|| config.auth.email.clone()),
            password: password.or_else(|| config.auth.password.clone()),
        }
    }

    fn require(&self) -> Result<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => bail!(
                "Email and password are required (use --email/--password or set \
                 SPENDWISE_AUTH__EMAIL and SPENDWISE_AUTH__PASSWORD)"
            ),
        }
    }
}

/// Whether `err` is a mistake in the user's input, shown without the
/// error chain.
pub fn is_user_error(err: &anyhow::Error) -> bool {
    if let Some(session) = err.downcast_ref::<SessionError>() {
        return session.is_user_error();
    }
    matches!(
        err.downcast_ref::<SpendError>(),
        Some(SpendError::Validation(_) | SpendError::InvalidInput(_))
    )
}

/// Wired-up client, session and expense list for one invocation
pub struct App {
    client: SpendwiseClient,
    session: SessionManager,
    expenses: Arc<ExpenseListController>,
    policy: BudgetPolicy,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = SpendwiseClient::new(config.api_config())
            .context("Failed to create API client")?;

        let session = SessionManager::new(Arc::new(client.clone()));
        let expenses = Arc::new(ExpenseListController::with_page_size(
            Arc::new(client.clone()),
            config.expenses.page_size,
        ));

        Ok(Self {
            client,
            session,
            expenses,
            policy: config.budget_policy(),
        })
    }

    pub async fn run(&self, command: Commands, credentials: &Credentials) -> Result<()> {
        match command {
            Commands::Register(args) => self.register(args, credentials).await?,
            Commands::Login => {
                let user = self.sign_in(credentials).await?;
                println!("Signed in as {} <{}>", user.display_name(), user.email);
            }
            Commands::Profile => {
                let user = self.sign_in(credentials).await?;
                output::print_profile(&user, &self.policy);
            }
            Commands::List { pages } => {
                self.sign_in(credentials).await?;
                self.load_pages(pages).await?;
                output::print_expenses(&self.expenses.expenses(), &self.policy);
                if self.expenses.has_more() {
                    println!("(more available, use --pages to fetch further)");
                }
            }
            Commands::Add(args) => {
                let user = self.sign_in(credentials).await?;
                self.add(args, &user).await?;
            }
            Commands::Edit { id, changes } => {
                self.sign_in(credentials).await?;
                self.edit(&ExpenseId::new(id), changes).await?;
            }
            Commands::Delete { id } => {
                self.sign_in(credentials).await?;
                self.expenses.delete_expense(&ExpenseId::new(id.as_str())).await?;
                println!("Deleted expense {}", id);
            }
            Commands::Show { id } => {
                self.sign_in(credentials).await?;
                let expense = self
                    .expenses
                    .get_expense_by_id(&ExpenseId::new(id))
                    .await?;
                output::print_expense_details(&expense, &self.policy);
            }
            Commands::Summary => {
                let user = self.sign_in(credentials).await?;
                self.load_pages(None).await?;
                let summary =
                    SpendingSummary::from_expenses(&self.expenses.expenses(), user.budget);
                output::print_summary(&summary, user.budget, &self.policy);
            }
            Commands::Budget { amount } => {
                self.sign_in(credentials).await?;
                self.set_budget(&amount).await?;
            }
        }

        Ok(())
    }

    /// Sign in and point the expense list at the signed-in user.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<User> {
        let (email, password) = credentials.require()?;
        let user = self.session.login(email, password).await?;
        self.attach_session().await;
        Ok(user)
    }

    async fn attach_session(&self) {
        self.client.set_access_token(self.session.token().await).await;
        if let LoadOutcome::Failed = self.expenses.set_owner(self.session.current_owner()).await {
            debug!("Initial expense page failed to load");
        }
    }

    async fn register(&self, args: RegisterArgs, credentials: &Credentials) -> Result<()> {
        let (email, password) = credentials.require()?;
        let budget = args
            .budget
            .as_deref()
            .map(spendwise_core::validation::parse_budget)
            .transpose()?;

        let form = RegistrationForm {
            first_name: args.first_name,
            last_name: args.last_name,
            username: args.username,
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: args.confirm_password.unwrap_or_else(|| password.to_string()),
        };

        let user = self.session.register(&form, budget).await?;
        self.attach_session().await;
        println!("Registered {} <{}> (id {})", user.display_name(), user.email, user.id);
        Ok(())
    }

    /// Fetch up to `pages` pages (all when `None`). The first page is
    /// already loaded by sign-in.
    async fn load_pages(&self, pages: Option<u32>) -> Result<()> {
        let mut loaded = 1;
        while self.expenses.has_more() && pages.map_or(true, |limit| loaded < limit) {
            match self.expenses.load_next_page().await {
                LoadOutcome::Loaded { .. } => loaded += 1,
                LoadOutcome::Failed => bail!("Failed to load expenses"),
                LoadOutcome::Skipped | LoadOutcome::Discarded => break,
            }
        }
        debug!(pages = loaded, count = self.expenses.expenses().len(), "Expenses loaded");
        Ok(())
    }

    async fn add(&self, args: ExpenseArgs, user: &User) -> Result<()> {
        let draft = ExpenseForm {
            title: args.title,
            amount: args.amount,
            category: args.category,
            description: args.description,
        }
        .validate()?;

        // Totals need every page, not only the first
        self.load_pages(None).await?;

        let created = self.expenses.create_expense(draft).await?;
        info!(expense_id = %created.id, "Expense recorded");
        println!("Added expense {}", created.id);
        output::print_expense_details(&created, &self.policy);

        if let Some(alert) = self.policy.check(self.expenses.total_spent(), user.budget) {
            output::print_alert(&self.policy, &alert);
        }
        Ok(())
    }

    async fn edit(&self, id: &ExpenseId, changes: ExpenseChanges) -> Result<()> {
        if changes.is_empty() {
            bail!("Nothing to change (use --title, --amount, --category or --description)");
        }

        let current = self.expenses.get_expense_by_id(id).await?;
        let draft = changes.into_form(&current).validate()?;
        let updated = self
            .expenses
            .update_expense(id, UpdateExpense::from(draft))
            .await?;

        println!("Updated expense {}", updated.id);
        output::print_expense_details(&updated, &self.policy);
        Ok(())
    }

    async fn set_budget(&self, amount: &str) -> Result<()> {
        let Some(user) = self.session.set_budget(amount).await? else {
            bail!("Not signed in");
        };
        println!("Budget set to {}", self.policy.format_amount(user.budget));

        self.load_pages(None).await?;
        if let Some(alert) = self.policy.check(self.expenses.total_spent(), user.budget) {
            output::print_alert(&self.policy, &alert);
        }
        Ok(())
    }
}
