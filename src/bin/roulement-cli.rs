#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use roulement::{
    io,
    model::{Dataset, Shift, ShiftId, ShiftKind, User, UserId, Window},
    presentation::{render_distribution, ScheduleRenderer, ScheduleView, TextSchedule},
    sample::sample_dataset,
    scheduler::{AssignOptions, ConflictRegistry, Scheduler, TieBreak},
    storage::{JsonRepository, Repository},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification de créneaux hebdomadaires
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Répertoire des fichiers JSON (users, shifts, conflicts, settings)
    #[arg(long, global = true, default_value = ".")]
    data_dir: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Fixed,
    Flexible,
}

impl From<KindArg> for ShiftKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Fixed => ShiftKind::Fixed,
            KindArg::Flexible => ShiftKind::Flexible,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter une personne
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 5)]
        max_shifts: u32,
        #[arg(long)]
        color: Option<String>,
        /// Plage "JOUR:DEBUT-FIN", répétable ; absent = toujours disponible
        #[arg(long = "available")]
        available: Vec<String>,
    },

    /// Supprimer une personne (affectations et conflits compris)
    RemoveUser {
        #[arg(long)]
        user: String,
    },

    /// Créer un créneau
    AddShift {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = KindArg::Fixed)]
        kind: KindArg,
        /// 0..6 ou nom de jour
        #[arg(long)]
        day: String,
        #[arg(long)]
        start: u8,
        #[arg(long)]
        end: u8,
        #[arg(long, default_value_t = 1)]
        staff: u32,
    },

    /// Supprimer un créneau
    RemoveShift {
        #[arg(long)]
        shift_id: String,
    },

    /// Importer des créneaux depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Déclarer deux personnes incompatibles
    AddConflict {
        #[arg(long)]
        user: String,
        #[arg(long)]
        with: String,
    },

    /// Retirer une incompatibilité
    RemoveConflict {
        #[arg(long)]
        user: String,
        #[arg(long)]
        with: String,
    },

    /// Enregistrer les réglages de planification
    Configure {
        #[arg(long)]
        window_start: Option<u8>,
        #[arg(long)]
        window_end: Option<u8>,
        /// Départage pseudo-aléatoire reproductible
        #[arg(long, conflicts_with = "by_id")]
        seed: Option<u64>,
        /// Départage par identifiant croissant
        #[arg(long)]
        by_id: bool,
        #[arg(long)]
        forbid_double_booking: Option<bool>,
    },

    /// Planifier tous les créneaux
    Schedule {
        #[arg(long)]
        window_start: Option<u8>,
        #[arg(long)]
        window_end: Option<u8>,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Affecter manuellement une personne
    Assign {
        #[arg(long)]
        shift_id: String,
        #[arg(long)]
        user: String,
    },

    /// Retirer une personne d'un créneau
    Unassign {
        #[arg(long)]
        shift_id: String,
        #[arg(long)]
        user: String,
    },

    /// Vider toutes les affectations
    Clear,

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vérifier le planning courant
    Check {
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Charger le jeu de démonstration
    LoadSample {
        /// Remplace des données existantes
        #[arg(long)]
        force: bool,
    },
}

fn resolve_user(dataset: &Dataset, key: &str) -> Result<UserId> {
    dataset
        .resolve_user(key)
        .map(|u| u.id.clone())
        .ok_or_else(|| anyhow!("unknown user: {key}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let repo = JsonRepository::open(&cli.data_dir)?;
    let mut dataset = repo.load_dataset();
    let mut settings = repo.load_settings();

    let code = match cli.cmd {
        Commands::AddUser {
            name,
            max_shifts,
            color,
            available,
        } => {
            let availability = io::parse_availability(&available)?;
            let mut user = User::new(name, max_shifts).with_availability(availability);
            if let Some(color) = color {
                user = user.with_color(color);
            }
            println!("{}", user.id);
            dataset.users.push(user);
            repo.save_users(&dataset.users)?;
            0
        }
        Commands::RemoveUser { user } => {
            let id = resolve_user(&dataset, &user)?;
            dataset.remove_user(&id);
            repo.save_dataset(&dataset)?;
            0
        }
        Commands::AddShift {
            name,
            kind,
            day,
            start,
            end,
            staff,
        } => {
            let day = io::parse_day(&day)?;
            let shift = Shift::new(name, kind.into(), Window::new(day, start, end), staff)
                .map_err(anyhow::Error::msg)?;
            println!("{}", shift.id);
            dataset.shifts.push(shift);
            repo.save_shifts(&dataset.shifts)?;
            0
        }
        Commands::RemoveShift { shift_id } => {
            if dataset.remove_shift(&ShiftId::new(&shift_id)).is_none() {
                bail!("unknown shift: {shift_id}");
            }
            repo.save_shifts(&dataset.shifts)?;
            0
        }
        Commands::ImportShifts { csv } => {
            let shifts = io::import_shifts_csv(csv)?;
            dataset.shifts.extend(shifts);
            repo.save_shifts(&dataset.shifts)?;
            0
        }
        Commands::AddConflict { user, with } => {
            let a = resolve_user(&dataset, &user)?;
            let b = resolve_user(&dataset, &with)?;
            let mut registry = ConflictRegistry::from_pairs(&dataset.conflicts);
            if !registry.add(&a, &b) {
                bail!("conflict already registered or same person");
            }
            repo.save_conflicts(&registry.to_pairs())?;
            0
        }
        Commands::RemoveConflict { user, with } => {
            let a = resolve_user(&dataset, &user)?;
            let b = resolve_user(&dataset, &with)?;
            let mut registry = ConflictRegistry::from_pairs(&dataset.conflicts);
            registry.remove(&a, &b);
            repo.save_conflicts(&registry.to_pairs())?;
            0
        }
        Commands::Configure {
            window_start,
            window_end,
            seed,
            by_id,
            forbid_double_booking,
        } => {
            if let Some(h) = window_start {
                settings.window_start_hour = h;
            }
            if let Some(h) = window_end {
                settings.window_end_hour = h;
            }
            if let Some(seed) = seed {
                settings.tie_break = TieBreak::Seeded { seed };
            }
            if by_id {
                settings.tie_break = TieBreak::ById;
            }
            if let Some(flag) = forbid_double_booking {
                settings.forbid_double_booking = flag;
            }
            settings.validate()?;
            repo.save_settings(&settings)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
            0
        }
        Commands::Schedule {
            window_start,
            window_end,
            seed,
        } => {
            if dataset.users.is_empty() {
                bail!("no users to schedule");
            }
            if dataset.shifts.is_empty() {
                bail!("no shifts to schedule");
            }
            let opts = AssignOptions {
                window_start_hour: window_start.unwrap_or(settings.window_start_hour),
                window_end_hour: window_end.unwrap_or(settings.window_end_hour),
                tie_break: seed.map_or(settings.tie_break, |seed| TieBreak::Seeded { seed }),
                ..settings
            };
            let scheduled = Scheduler::from_dataset(&dataset, opts).schedule_all(&dataset.shifts)?;
            repo.save_shifts(&scheduled)?;
            let view = ScheduleView::new(&scheduled, &dataset.users);
            print!("{}", render_distribution(&view));
            let understaffed = view.understaffed();
            if understaffed.is_empty() {
                0
            } else {
                eprintln!("{} shift(s) understaffed", understaffed.len());
                2
            }
        }
        Commands::Assign { shift_id, user } => {
            let uid = resolve_user(&dataset, &user)?;
            let sid = ShiftId::new(shift_id);
            let mut shifts = dataset.shifts.clone();
            Scheduler::from_dataset(&dataset, settings).assign_manual(&mut shifts, &sid, &uid)?;
            repo.save_shifts(&shifts)?;
            0
        }
        Commands::Unassign { shift_id, user } => {
            let uid = resolve_user(&dataset, &user)?;
            let sid = ShiftId::new(shift_id);
            let mut shifts = dataset.shifts.clone();
            Scheduler::from_dataset(&dataset, settings).unassign(&mut shifts, &sid, &uid)?;
            repo.save_shifts(&shifts)?;
            0
        }
        Commands::Clear => {
            let mut shifts = dataset.shifts.clone();
            Scheduler::from_dataset(&dataset, settings).clear_assignments(&mut shifts);
            repo.save_shifts(&shifts)?;
            0
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_dataset_json(path, &dataset)?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &dataset.shifts, &dataset.users)?;
            }
            let view = ScheduleView::new(&dataset.shifts, &dataset.users);
            print!("{}", TextSchedule.render(&view));
            0
        }
        Commands::Check { report } => {
            let conflicts =
                Scheduler::from_dataset(&dataset, settings).detect_conflicts(&dataset.shifts);
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    eprintln!(
                        "  {} shift={} user={}",
                        c.kind.as_str(),
                        c.shift_a,
                        c.user.as_ref().map(UserId::as_str).unwrap_or("-")
                    );
                }
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["kind", "shift_a", "shift_b", "user", "other"])?;
                    for c in &conflicts {
                        w.write_record([
                            c.kind.as_str(),
                            c.shift_a.as_str(),
                            c.shift_b.as_ref().map(ShiftId::as_str).unwrap_or(""),
                            c.user.as_ref().map(UserId::as_str).unwrap_or(""),
                            c.other.as_ref().map(UserId::as_str).unwrap_or(""),
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::LoadSample { force } => {
            if !force && !(dataset.users.is_empty() && dataset.shifts.is_empty()) {
                bail!("data already present, use --force to replace it");
            }
            let sample = sample_dataset();
            repo.save_dataset(&sample)?;
            println!(
                "Sample data loaded: {} users, {} shifts, {} conflict(s)",
                sample.users.len(),
                sample.shifts.len(),
                sample.conflicts.len()
            );
            0
        }
    };

    std::process::exit(code);
}
