use crate::app::render::render;
use crate::core::router::Route;
use crate::core::storefront::Storefront;
use crate::domain::model::{ProductId, SortOrder};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{Result, StoreError};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP: &str = "\
Commands:
  list                 product list
  sort asc|desc        sort the list by price
  category <name|all>  choose a category
  filter               fetch the chosen category
  open <id>            product details
  add                  add the open product to the cart
  back                 previous screen
  retry                fetch the current screen again
  cart                 show the cart
  remove <id>          remove a product from the cart
  go <path>            open /, /product/<id> or /cart
  help                 this text
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Sort(SortOrder),
    Category(String),
    Filter,
    Open(ProductId),
    Add,
    Back,
    Retry,
    Cart,
    Remove(ProductId),
    Go(Route),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Render,
    ShowHelp,
    Quit,
}

fn invalid(message: impl Into<String>) -> StoreError {
    StoreError::InvalidCommand {
        message: message.into(),
    }
}

fn parse_id(arg: &str) -> Result<ProductId> {
    arg.parse()
        .map_err(|_| invalid(format!("'{}' is not a product id", arg)))
}

impl FromStr for Command {
    type Err = StoreError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word.to_ascii_lowercase().as_str(), rest) {
            ("list" | "home", "") => Self::List,
            ("sort", order) => Self::Sort(order.parse().map_err(invalid)?),
            ("category", name) => Self::Category(name.to_string()),
            ("filter", "") => Self::Filter,
            ("open", id) => Self::Open(parse_id(id)?),
            ("add", "") => Self::Add,
            ("back", "") => Self::Back,
            ("retry", "") => Self::Retry,
            ("cart", "") => Self::Cart,
            ("remove", id) => Self::Remove(parse_id(id)?),
            ("go", path) => Self::Go(Route::parse(path)?),
            ("help" | "?", "") => Self::Help,
            ("quit" | "exit", "") => Self::Quit,
            _ => return Err(invalid(format!("unknown command '{}'", line))),
        };
        Ok(command)
    }
}

pub async fn execute<C: CatalogProvider>(
    store: &mut Storefront<C>,
    command: Command,
) -> Result<Flow> {
    match command {
        Command::List => store.navigate(Route::List).await,
        Command::Sort(order) => store.set_sort_order(order)?,
        Command::Category(name) => store.select_category(&name)?,
        Command::Filter => {
            store.apply_filter().await?;
        }
        Command::Open(id) => store.open_product(id).await,
        Command::Add => {
            store.add_to_cart()?;
        }
        Command::Back => store.back().await,
        Command::Retry => {
            store.retry().await?;
        }
        Command::Cart => store.navigate(Route::Cart).await,
        Command::Remove(id) => {
            store.remove_from_cart(id)?;
        }
        Command::Go(route) => store.navigate(route).await,
        Command::Help => return Ok(Flow::ShowHelp),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Render)
}

/// Runs the interactive session until `quit` or end of input.
///
/// Command errors are reported on `output` and never end the session.
/// Cart notifications are written as soon as the command that caused them
/// finishes.
pub async fn run<C, R, W>(store: &mut Storefront<C>, input: R, output: &mut W) -> Result<()>
where
    C: CatalogProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut events = store.subscribe();
    store.start().await;
    writeln!(output, "{}", render(store))?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!("Unrecognised input '{}': {}", line.trim(), e);
                writeln!(output, "! {}", e.user_friendly_message())?;
                writeln!(output, "{}", HELP)?;
                continue;
            }
        };
        let flow = execute(store, command).await;

        while let Ok(event) = events.try_recv() {
            writeln!(output, "✔ {}", event)?;
        }

        match flow {
            Ok(Flow::Quit) => break,
            Ok(Flow::ShowHelp) => writeln!(output, "{}", HELP)?,
            Ok(Flow::Render) => writeln!(output, "{}", render(store))?,
            Err(e) => {
                tracing::debug!("Command '{}' rejected: {}", line.trim(), e);
                writeln!(output, "! {}", e.user_friendly_message())?;
                writeln!(output, "  {}", e.recovery_suggestion())?;
            }
        }
    }

    output.flush()?;
    Ok(())
}
