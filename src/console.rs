//! Line-oriented console front end.
//!
//! Turns typed lines into commands for the app controller and draws [`Screen`]s as plain
//! text.

use sickseek_catalog::{ProviderId, ReviewFilter};
use sickseek_core::{
    CategoryFilter, CategoryIdentity, Intent, ProfileChange, RejectReason, ScanState, Screen,
    ShellBody, Tab, TagKind,
};
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  signin [tab]              sign in (optionally straight to a tab)
  signout                   sign out
  tab <find|procedures|scan|matching|health>
  search [text]             filter providers (empty clears)
  chip <label>              pick a category chip, e.g. Dental or All
  open <id>                 show a provider
  close                     close the provider
  reviews <nationality>     filter reviews (All shows every review)
  category <id>             open a procedure category
  procedure <n>             open a procedure's steps
  back                      go back one level
  insurance <key>           explain an insurance type
  dismiss                   close the insurance popup
  allergy add|rm <value>    edit allergies
  med add|rm <value>        edit medications
  rename <name>             change your display name
  scan <path>               scan a prescription image
  newscan                   start over
  share <origin>            print the link to your Health tab
  help | quit";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Intent(Intent),
    SignIn(Option<Tab>),
    Share(String),
    Help,
    Quit,
}

/// Parses one input line.
///
/// Returns `Ok(None)` for a blank line and `Err` with a short message for anything
/// unrecognised.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "signin" => {
            if rest.is_empty() {
                Command::SignIn(None)
            } else {
                Command::SignIn(Some(parse_tab(rest)?))
            }
        }
        "signout" => Command::Intent(Intent::SignOut),
        "tab" => Command::Intent(Intent::SelectTab(parse_tab(rest)?)),
        "search" => Command::Intent(Intent::Search(rest.to_owned())),
        "chip" => Command::Intent(Intent::SelectChip(CategoryFilter::parse(rest))),
        "open" => Command::Intent(Intent::SelectProvider(ProviderId(parse_number(rest)?))),
        "close" => Command::Intent(Intent::CloseProvider),
        "reviews" => Command::Intent(Intent::FilterReviews(ReviewFilter::parse(rest))),
        "category" => Command::Intent(Intent::SelectCategory(required(rest)?.into())),
        "procedure" => Command::Intent(Intent::SelectProcedure(parse_number(rest)?)),
        "back" => Command::Intent(Intent::Back),
        "insurance" => Command::Intent(Intent::OpenInsurance(required(rest)?.into())),
        "dismiss" => Command::Intent(Intent::CloseInsurance),
        "allergy" => tag_command(TagKind::Allergy, rest)?,
        "med" | "medication" => tag_command(TagKind::Medication, rest)?,
        "rename" => Command::Intent(Intent::Rename(rest.to_owned())),
        "scan" => Command::Intent(Intent::StartScan(PathBuf::from(required(rest)?))),
        "newscan" => Command::Intent(Intent::ResetScan),
        "share" => Command::Share(required(rest)?.to_owned()),
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

fn required(rest: &str) -> Result<&str, String> {
    if rest.is_empty() {
        Err("missing argument".into())
    } else {
        Ok(rest)
    }
}

fn parse_tab(input: &str) -> Result<Tab, String> {
    Tab::parse(input).ok_or_else(|| format!("unknown tab '{input}'"))
}

fn parse_number<T: std::str::FromStr>(input: &str) -> Result<T, String> {
    input
        .parse()
        .map_err(|_| format!("expected a number, got '{input}'"))
}

fn tag_command(kind: TagKind, rest: &str) -> Result<Command, String> {
    let (action, value) = rest
        .split_once(char::is_whitespace)
        .map(|(a, v)| (a, v.trim()))
        .unwrap_or((rest, ""));
    let intent = match action {
        "add" => Intent::AddTag(kind, value.to_owned()),
        "rm" | "remove" => Intent::RemoveTag(kind, value.to_owned()),
        _ => return Err(format!("expected 'add' or 'rm' after {}", kind.label())),
    };
    Ok(Command::Intent(intent))
}

/// One-line feedback for a profile operation.
pub fn describe_change(change: ProfileChange) -> Option<&'static str> {
    match change {
        ProfileChange::Applied { persisted: true } => None,
        ProfileChange::Applied { persisted: false } => {
            Some("(saved on this device only; syncing failed)")
        }
        ProfileChange::Rejected(RejectReason::Empty) => Some("(nothing to save)"),
        ProfileChange::Rejected(RejectReason::Duplicate) => Some("(already listed)"),
        ProfileChange::Rejected(RejectReason::Absent) => Some("(not in the list)"),
    }
}

// ============================================================================
// RENDERING
// ============================================================================

pub fn render(screen: &Screen<'_>) -> String {
    let mut out = Vec::new();
    match screen {
        Screen::Splash => out.push("Sick&Seek\nFind care in Korea, in your language.".to_owned()),
        Screen::Loading => out.push("Loading...".to_owned()),
        Screen::SignInGate => {
            out.push("Welcome to Sick&Seek".to_owned());
            out.push("Type 'signin' to continue (as a guest unless an identity is configured), or 'signin health' for Emergency / My Health.".to_owned());
        }
        Screen::Shell { tab, body, modal } => {
            out.push(tab_bar(*tab));
            render_body(body, &mut out);
            if let Some(info) = modal {
                out.push(String::new());
                out.push(format!("+-- {} --", info.title));
                out.push(format!("| Coverage: {}", info.coverage));
                out.push(format!("| Benefits: {}", info.benefits));
                out.push(format!("| Who: {}", info.eligibility));
                out.push(format!("| Tips: {}", info.tips));
                out.push("+-- 'dismiss' to close".to_owned());
            }
        }
    }
    out.join("\n")
}

fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn badge(identity: &CategoryIdentity) -> String {
    match identity {
        CategoryIdentity::All => "all".to_owned(),
        CategoryIdentity::Category(id) => id.to_string(),
        CategoryIdentity::Uncategorised => "-".to_owned(),
    }
}

fn render_body(body: &ShellBody<'_>, out: &mut Vec<String>) {
    match body {
        ShellBody::Provider {
            provider,
            badge: identity,
            insurance,
            reviews,
            nationalities,
            filter,
        } => {
            out.push(format!(
                "{} <{}> {}",
                provider.name,
                badge(identity),
                if provider.is_hot() { "HOT" } else { "" }
            ));
            out.push(format!(
                "{} | ★{:.1} ({} reviews) | English: {}",
                provider.location,
                provider.rating,
                provider.review_count,
                provider.language.label()
            ));
            out.push(provider.description.clone());
            for info in insurance {
                out.push(format!("  insurance: {} ({})", info.key, info.title));
            }
            let selected = match filter {
                ReviewFilter::All => "All",
                ReviewFilter::Nationality(n) => n.as_str(),
            };
            out.push(format!(
                "Reviews [{}] from: {}",
                selected,
                nationalities.join(", ")
            ));
            for review in reviews {
                out.push(format!(
                    "  {} ({}) {}/5: {} {}",
                    review.author,
                    review.nationality,
                    review.rating,
                    review.comment,
                    review.tags.join(" ")
                ));
            }
            out.push("'close' to go back".to_owned());
        }
        ShellBody::Find {
            chips,
            selected,
            query,
            results,
        } => {
            let chips: Vec<String> = chips
                .iter()
                .map(|chip| {
                    if chip == *selected {
                        format!("[{}]", chip.label())
                    } else {
                        chip.label().to_owned()
                    }
                })
                .collect();
            out.push(chips.join(" "));
            if !query.is_empty() {
                out.push(format!("Search: {query}"));
            }
            if results.is_empty() {
                out.push("No providers found.".to_owned());
            }
            for provider in results {
                out.push(format!(
                    "{:>3}  {}{}  [{}]  {}  ★{:.1}",
                    provider.id.0,
                    provider.name,
                    if provider.is_hot() { " HOT" } else { "" },
                    provider.specialty,
                    provider.location,
                    provider.rating
                ));
            }
        }
        ShellBody::CategoryGrid { categories } => {
            out.push("Procedures".to_owned());
            for category in categories.iter() {
                out.push(format!("  {}: {}", category.id, category.label));
            }
        }
        ShellBody::ProcedureList { category } => {
            out.push(category.label.clone());
            for (i, procedure) in category.procedures.iter().enumerate() {
                out.push(format!("  {}: {}", i, procedure.title));
            }
        }
        ShellBody::Steps {
            category,
            procedure,
        } => {
            out.push(format!("{} / {}", category.label, procedure.title));
            for (n, step) in procedure.steps.iter().enumerate() {
                out.push(format!("  {}. {}", n + 1, step));
            }
        }
        ShellBody::Scan(state) => match state {
            ScanState::Idle => out.push("Scan a prescription: 'scan <path>'".to_owned()),
            ScanState::Scanning { image } => {
                out.push(format!("Scanning {}...", image.file_name()));
            }
            ScanState::Result { image, annotations } => {
                out.push(format!("Result for {}", image.file_name()));
                for line in &annotations.lines {
                    out.push(format!("  {line}"));
                }
                out.push(annotations.disclaimer.clone());
            }
        },
        ShellBody::Matching(view) => {
            out.push(format!("{}: {}", view.title, view.subtitle));
            out.push(format!("[locked] {}", view.headline));
            out.push(view.pitch.to_owned());
            out.push(format!("> {}", view.call_to_action));
        }
        ShellBody::Profile { identity, profile } => {
            if let Some(identity) = identity {
                if let Some(email) = &identity.email {
                    out.push(email.clone());
                }
            }
            match profile {
                Some(profile) => {
                    out.push(format!("Name: {}", profile.name));
                    for kind in [TagKind::Allergy, TagKind::Medication] {
                        out.push(format!("{}: {}", kind.label(), profile.tags(kind).join(", ")));
                    }
                }
                None => out.push("Profile unavailable.".to_owned()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(
            parse_command("tab health").unwrap(),
            Some(Command::Intent(Intent::SelectTab(Tab::Profile)))
        );
        assert_eq!(
            parse_command("open 3").unwrap(),
            Some(Command::Intent(Intent::SelectProvider(ProviderId(3))))
        );
        assert_eq!(
            parse_command("insurance Travel Ins.").unwrap(),
            Some(Command::Intent(Intent::OpenInsurance("Travel Ins.".into())))
        );
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_tag_commands() {
        assert_eq!(
            parse_command("allergy add Peanut butter").unwrap(),
            Some(Command::Intent(Intent::AddTag(
                TagKind::Allergy,
                "Peanut butter".into()
            )))
        );
        assert_eq!(
            parse_command("med rm Tylenol").unwrap(),
            Some(Command::Intent(Intent::RemoveTag(
                TagKind::Medication,
                "Tylenol".into()
            )))
        );
        assert!(parse_command("allergy drop Dust").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_input() {
        assert!(parse_command("dance").is_err());
        assert!(parse_command("open seven").is_err());
        assert!(parse_command("tab settings").is_err());
        assert!(parse_command("category").is_err());
    }

    #[test]
    fn test_sign_in_target_tab() {
        assert_eq!(parse_command("signin").unwrap(), Some(Command::SignIn(None)));
        assert_eq!(
            parse_command("signin health").unwrap(),
            Some(Command::SignIn(Some(Tab::Profile)))
        );
    }

    #[test]
    fn test_tab_bar_marks_active_tab() {
        assert_eq!(
            tab_bar(Tab::Scan),
            " Find   Procedures  [Scan]  Matching   Health "
        );
    }
}
