use crate::model::{Availability, Dataset, Shift, ShiftKind, User, UserId, Window, DAYS_PER_WEEK};
use crate::presentation::day_label;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Construit une grille à partir de plages `JOUR:DEBUT-FIN`.
///
/// `JOUR` vaut 0..6 ou un nom anglais (`mon`, `Tuesday`...). Une liste vide
/// signifie « toujours disponible ».
pub fn parse_availability<S: AsRef<str>>(specs: &[S]) -> anyhow::Result<Availability> {
    if specs.is_empty() {
        return Ok(Availability::always());
    }
    let mut grid = Availability::never();
    for spec in specs {
        let spec = spec.as_ref().trim();
        let (day_raw, range) = spec
            .split_once(':')
            .with_context(|| format!("expected DAY:START-END, got {spec}"))?;
        let day = parse_day(day_raw.trim())?;
        let (start_raw, end_raw) = range
            .split_once('-')
            .with_context(|| format!("expected START-END in {spec}"))?;
        let start = parse_hour(start_raw)?;
        let end = parse_hour(end_raw)?;
        if start >= end || end > 24 {
            bail!("invalid hour range in {spec}");
        }
        grid.set_range(day, start, end, true);
    }
    Ok(grid)
}

/// Jour 0..6 ou nom de jour (lundi = 0).
pub fn parse_day(raw: &str) -> anyhow::Result<u8> {
    if let Ok(n) = raw.parse::<u8>() {
        if usize::from(n) < DAYS_PER_WEEK {
            return Ok(n);
        }
        bail!("day must be within 0..{DAYS_PER_WEEK}: {raw}");
    }
    let weekday: chrono::Weekday = raw
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown day: {raw}"))?;
    Ok(weekday.num_days_from_monday() as u8)
}

fn parse_hour(raw: &str) -> anyhow::Result<u8> {
    raw.trim()
        .parse::<u8>()
        .with_context(|| format!("invalid hour: {raw}"))
}

/// Import de shifts: header `name,type,day,start_hour,end_hour,required_staff`
pub fn import_shifts_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Shift>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim().to_string();
        let kind: ShiftKind = rec
            .get(1)
            .context("missing type")?
            .parse()
            .map_err(anyhow::Error::msg)?;
        let day = parse_day(rec.get(2).context("missing day")?.trim())?;
        let start = parse_hour(rec.get(3).context("missing start_hour")?)?;
        let end = parse_hour(rec.get(4).context("missing end_hour")?)?;
        let staff: u32 = rec
            .get(5)
            .context("missing required_staff")?
            .trim()
            .parse()
            .with_context(|| format!("invalid required_staff for {name}"))?;
        let shift = Shift::new(name, kind, Window::new(day, start, end), staff)
            .map_err(anyhow::Error::msg)?;
        out.push(shift);
    }
    Ok(out)
}

/// Export JSON du jeu de données (jolie mise en forme)
pub fn export_dataset_json<P: AsRef<Path>>(path: P, dataset: &Dataset) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(dataset)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning: header `id,name,type,day,start_hour,end_hour,required_staff,assigned`
///
/// `assigned` liste les noms séparés par `;`.
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    shifts: &[Shift],
    users: &[User],
) -> anyhow::Result<()> {
    let names: HashMap<&UserId, &str> = users.iter().map(|u| (&u.id, u.name.as_str())).collect();
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "name",
        "type",
        "day",
        "start_hour",
        "end_hour",
        "required_staff",
        "assigned",
    ])?;
    for s in shifts {
        let assigned = s
            .assigned_users
            .iter()
            .map(|id| names.get(id).copied().unwrap_or(id.as_str()))
            .collect::<Vec<_>>()
            .join(";");
        w.write_record([
            s.id.as_str(),
            s.name.as_str(),
            s.kind.as_str(),
            day_label(s.day).as_str(),
            s.start_hour.to_string().as_str(),
            s.end_hour.to_string().as_str(),
            s.required_staff.to_string().as_str(),
            assigned.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
