#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use conges::{
    calendar,
    io::{self, parse_date},
    model::{Booking, BookingKey, Color},
    storage::{open_store, PendingFile},
    workflow::{AddOutcome, AddRequest, Pending, Session, WorkflowError},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de suivi des congés d'équipe
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier de store (`.json` ou `.csv`)
    #[arg(long, global = true, env = "CONGES_STORE", default_value = "conges.json")]
    store: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Demander l'ajout d'une période de congés
    Add {
        #[arg(long)]
        member: String,
        /// YYYY-MM-DD ou DD/MM/YYYY
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD ou DD/MM/YYYY (inclus)
        #[arg(long)]
        end: String,
        /// #RRGGBB ; par défaut la couleur du membre
        #[arg(long)]
        color: Option<String>,
    },

    /// Confirmer l'ajout en attente malgré le chevauchement
    Confirm,

    /// Abandonner l'ajout en attente
    Cancel,

    /// Afficher l'ajout en attente
    Pending,

    /// Supprimer une période (triplet exact)
    Remove {
        #[arg(long)]
        member: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Légende des couleurs par membre
    Legend,

    /// Couleur proposée pour un nom
    Color {
        #[arg(long)]
        name: String,
    },

    /// Calendrier texte d'un mois ou d'une année
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let store = open_store(&cli.store)?;
    let pending_file = PendingFile::beside(&cli.store);

    let (mut session, warning) = Session::open(&*store);
    if let Some(err) = warning {
        eprintln!("Warning: {err}");
    }
    // une attente illisible n'empêche pas les autres commandes ; `cancel` la supprime
    let mut stale_pending = false;
    match pending_file.load() {
        Ok(Some(pending)) => {
            if let Err(err) = session.restore_pending(pending) {
                eprintln!("Warning: ignoring saved pending booking: {err}");
                stale_pending = true;
            }
        }
        Ok(None) => {}
        Err(err) => {
            eprintln!("Warning: ignoring saved pending booking: {err:#}");
            stale_pending = true;
        }
    }

    let code = match cli.cmd {
        Commands::Add {
            member,
            start,
            end,
            color,
        } => {
            let mut req = AddRequest::new(member, parse_date(&start)?, parse_date(&end)?);
            if let Some(raw) = color {
                let color: Color = raw.parse().map_err(anyhow::Error::msg)?;
                req = req.with_color(color);
            }
            match session.request_add(&*store, req) {
                Ok(AddOutcome::Committed(booking)) => {
                    println!("Saved: {} ({})", booking.member, booking.period_label());
                    0
                }
                Ok(AddOutcome::NeedsConfirmation(pending)) => {
                    pending_file.save(&pending)?;
                    print_pending(&pending);
                    eprintln!("Overlap detected: run `confirm` to save anyway or `cancel`.");
                    // Code 2 = en attente de confirmation
                    2
                }
                Err(err @ (WorkflowError::InvalidInput(_) | WorkflowError::InvalidState(_))) => {
                    eprintln!("{err}");
                    1
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Confirm => match session.confirm(&*store) {
            Ok(booking) => {
                pending_file.clear()?;
                println!(
                    "Saved (with overlap): {} ({})",
                    booking.member,
                    booking.period_label()
                );
                0
            }
            Err(err @ WorkflowError::InvalidState(_)) => {
                eprintln!("{err}");
                1
            }
            Err(err) => return Err(err.into()),
        },
        Commands::Cancel => match session.cancel() {
            Ok(pending) => {
                pending_file.clear()?;
                println!("Cancelled: {}", pending.candidate.member);
                0
            }
            Err(_) if stale_pending => {
                pending_file.clear()?;
                println!("Discarded unreadable pending booking");
                0
            }
            Err(err) => {
                eprintln!("{err}");
                1
            }
        },
        Commands::Pending => {
            match session.pending() {
                Some(pending) => print_pending(pending),
                None => println!("No booking awaiting confirmation"),
            }
            0
        }
        Commands::Remove { member, start, end } => {
            let key = BookingKey::new(member.trim(), parse_date(&start)?, parse_date(&end)?);
            match session.remove(&*store, &key) {
                Ok(booking) => {
                    println!("Removed: {} ({})", booking.member, booking.period_label());
                    0
                }
                Err(err @ WorkflowError::NotFound(_)) => {
                    eprintln!("{err}");
                    1
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_bookings_json(path, session.bookings())?;
            }
            if let Some(path) = out_csv {
                io::export_bookings_csv(path, session.bookings())?;
            }
            let rows = calendar::listing(session.bookings());
            if rows.is_empty() {
                println!("No vacation recorded yet");
            }
            for b in rows {
                println!("{} | {} | {}", b.member, b.period_label(), b.color);
            }
            0
        }
        Commands::Legend => {
            for entry in session.legend() {
                println!("{} {}", entry.color, entry.member);
            }
            0
        }
        Commands::Color { name } => {
            println!("{}", session.default_color(&name));
            0
        }
        Commands::Calendar { year, month } => {
            let year = year.unwrap_or_else(|| Local::now().date_naive().year());
            match month {
                Some(month) => print_month(session.bookings(), year, month)?,
                None => {
                    for month in 1..=12 {
                        print_month(session.bookings(), year, month)?;
                        println!();
                    }
                }
            }
            0
        }
    };

    std::process::exit(code);
}

fn print_pending(pending: &Pending) {
    println!(
        "Pending: {} ({})",
        pending.candidate.member,
        pending.candidate.period_label()
    );
    println!("Conflicting bookings:");
    for b in &pending.conflicts {
        println!("- {} ({})", b.member, b.period_label());
    }
}

fn print_month(bookings: &[Booking], year: i32, month: u32) -> Result<()> {
    let weeks = calendar::month_weeks(year, month)?;
    println!("{year}-{month:02}");
    let header: Vec<String> = ["Lu", "Ma", "Me", "Je", "Ve", "Sa", "Di"]
        .iter()
        .map(|d| format!("{d:<3}"))
        .collect();
    println!("{}", header.join(" ").trim_end());

    let mut busy = Vec::new();
    for week in &weeks {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let here = calendar::bookings_on(bookings, *day);
                    if here.is_empty() {
                        format!("{:>2} ", day.day())
                    } else {
                        busy.push((*day, here));
                        format!("{:>2}*", day.day())
                    }
                }
                None => "   ".to_string(),
            })
            .collect();
        println!("{}", cells.join(" ").trim_end());
    }
    for (day, here) in busy {
        let names: Vec<&str> = here.iter().map(|b| b.member.as_str()).collect();
        println!("  {}: {}", day.format(io::DISPLAY_DATE_FORMAT), names.join(", "));
    }
    Ok(())
}
