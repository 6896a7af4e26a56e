//! Daily punch aggregation.
//!
//! This module groups raw punches into calendar days, classifies each day
//! as worked, absent, justified or vacation, and pairs the punches of a
//! worked day into worked minutes.
//!
//! Timestamps are already in organization local time, so days are matched
//! on the timestamp's own date components.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{MedicalCertificate, RecordType, TimeRecord, Vacation};

use super::leave::{approved_certificate_on, approved_vacation_on};

/// Classification of a calendar day, highest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Excused by an ABSENCE_JUSTIFIED punch or an approved certificate.
    Justified,
    /// Covered by an approved vacation.
    Vacation,
    /// At least one valid ENTRY punch.
    Worked,
    /// Nothing of the above.
    Absent,
}

/// The punches of one day, reduced to one of each core type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPunches {
    /// Earliest ENTRY.
    pub entry: Option<NaiveDateTime>,
    /// Earliest LUNCH_START.
    pub lunch_start: Option<NaiveDateTime>,
    /// Latest LUNCH_END.
    pub lunch_end: Option<NaiveDateTime>,
    /// Latest EXIT.
    pub exit: Option<NaiveDateTime>,
    /// Closed BREAK_START/BREAK_END pairs.
    pub breaks: Vec<(NaiveDateTime, NaiveDateTime)>,
}

impl DayPunches {
    fn get(&self, record_type: RecordType) -> Option<NaiveDateTime> {
        match record_type {
            RecordType::Entry => self.entry,
            RecordType::LunchStart => self.lunch_start,
            RecordType::LunchEnd => self.lunch_end,
            RecordType::Exit => self.exit,
            _ => None,
        }
    }
}

/// The aggregated view of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    /// The calendar date.
    pub date: NaiveDate,
    /// How the day is classified.
    pub kind: DayKind,
    /// The day's punches; kept even when they do not count.
    pub punches: DayPunches,
    /// Minutes worked according to the punch pairs. Zero unless `Worked`.
    pub worked_minutes: i64,
    /// True when a punch of the core sequence was missing.
    pub incomplete: bool,
    /// Explanations of anything unusual about the day.
    pub notes: Vec<String>,
}

/// Groups records by their local calendar date.
pub fn group_records_by_day<'a, I>(records: I) -> BTreeMap<NaiveDate, Vec<&'a TimeRecord>>
where
    I: IntoIterator<Item = &'a TimeRecord>,
{
    let mut by_day: BTreeMap<NaiveDate, Vec<&'a TimeRecord>> = BTreeMap::new();
    for record in records {
        by_day.entry(record.date()).or_default().push(record);
    }
    by_day
}

/// Aggregates the punches of `date` and classifies the day.
///
/// Records dated on other days are ignored, as are records an approver
/// invalidated. Precedence: an ABSENCE_JUSTIFIED punch, then an approved
/// vacation, then an approved medical certificate, then any ENTRY punch;
/// a day with none of these is absent.
pub fn aggregate_day<'a, I>(
    records: I,
    date: NaiveDate,
    vacations: &[Vacation],
    certificates: &[MedicalCertificate],
) -> DayClassification
where
    I: IntoIterator<Item = &'a TimeRecord>,
{
    let mut notes = Vec::new();
    let mut valid: Vec<&TimeRecord> = Vec::new();

    for record in records.into_iter().filter(|r| r.date() == date) {
        if record.is_valid {
            valid.push(record);
        } else {
            notes.push(format!("ignored invalidated {} punch", record.record_type));
        }
    }
    valid.sort_by_key(|r| r.timestamp);

    let has_work_punches = valid
        .iter()
        .any(|r| r.record_type != RecordType::AbsenceJustified);

    if valid
        .iter()
        .any(|r| r.record_type == RecordType::AbsenceJustified)
    {
        notes.push("absence justified by punch".to_string());
        if has_work_punches {
            notes.push("punches on a justified day are not counted".to_string());
        }
        return leave_day(date, DayKind::Justified, &valid, notes);
    }

    if let Some(vacation) = approved_vacation_on(vacations, date) {
        notes.push(format!("approved vacation {}", vacation.id));
        if has_work_punches {
            notes.push("punches on a vacation day are not counted".to_string());
        }
        return leave_day(date, DayKind::Vacation, &valid, notes);
    }

    if let Some(certificate) = approved_certificate_on(certificates, date) {
        notes.push(format!("approved medical certificate {}", certificate.id));
        if has_work_punches {
            notes.push("punches on a certified day are not counted".to_string());
        }
        return leave_day(date, DayKind::Justified, &valid, notes);
    }

    if !valid.iter().any(|r| r.record_type == RecordType::Entry) {
        if has_work_punches {
            notes.push("punches without ENTRY are not counted".to_string());
        }
        let (punches, _) = collect_punches(&valid, &mut Vec::new());
        return DayClassification {
            date,
            kind: DayKind::Absent,
            punches,
            worked_minutes: 0,
            incomplete: false,
            notes,
        };
    }

    let (punches, break_minutes) = collect_punches(&valid, &mut notes);
    let (segment_minutes, incomplete) = pair_punches(&punches, &mut notes);

    DayClassification {
        date,
        kind: DayKind::Worked,
        punches,
        worked_minutes: (segment_minutes - break_minutes).max(0),
        incomplete,
        notes,
    }
}

fn leave_day(
    date: NaiveDate,
    kind: DayKind,
    valid: &[&TimeRecord],
    notes: Vec<String>,
) -> DayClassification {
    let (punches, _) = collect_punches(valid, &mut Vec::new());
    DayClassification {
        date,
        kind,
        punches,
        worked_minutes: 0,
        incomplete: false,
        notes,
    }
}

/// Reduces sorted records to a [`DayPunches`] and the total closed break minutes.
///
/// The earliest ENTRY and LUNCH_START and the latest LUNCH_END and EXIT are
/// kept.
fn collect_punches(sorted: &[&TimeRecord], notes: &mut Vec<String>) -> (DayPunches, i64) {
    let mut punches = DayPunches::default();
    let mut open_break: Option<NaiveDateTime> = None;

    for record in sorted {
        let ts = record.timestamp;
        match record.record_type {
            RecordType::Entry => keep_earliest(&mut punches.entry, record, notes),
            RecordType::LunchStart => keep_earliest(&mut punches.lunch_start, record, notes),
            RecordType::LunchEnd => keep_latest(&mut punches.lunch_end, record, notes),
            RecordType::Exit => keep_latest(&mut punches.exit, record, notes),
            RecordType::BreakStart => {
                if open_break.is_some() {
                    notes.push("duplicate BREAK_START ignored".to_string());
                } else {
                    open_break = Some(ts);
                }
            }
            RecordType::BreakEnd => match open_break.take() {
                Some(start) => punches.breaks.push((start, ts)),
                None => notes.push("BREAK_END without BREAK_START ignored".to_string()),
            },
            RecordType::AbsenceJustified => {}
        }
    }

    if open_break.is_some() {
        notes.push("missing BREAK_END, open break ignored".to_string());
    }

    let break_minutes = punches
        .breaks
        .iter()
        .map(|(start, end)| (*end - *start).num_minutes().max(0))
        .sum();

    (punches, break_minutes)
}

fn keep_earliest(slot: &mut Option<NaiveDateTime>, record: &TimeRecord, notes: &mut Vec<String>) {
    if slot.is_some() {
        notes.push(format!("duplicate {} ignored", record.record_type));
    } else {
        *slot = Some(record.timestamp);
    }
}

fn keep_latest(slot: &mut Option<NaiveDateTime>, record: &TimeRecord, notes: &mut Vec<String>) {
    if slot.is_some() {
        notes.push(format!("duplicate {}, latest kept", record.record_type));
    }
    *slot = Some(record.timestamp);
}

/// Pairs ENTRY→LUNCH_START and LUNCH_END→EXIT into worked minutes.
///
/// Returns the paired minutes and whether the core sequence was incomplete.
fn pair_punches(punches: &DayPunches, notes: &mut Vec<String>) -> (i64, bool) {
    let mut incomplete = false;
    for record_type in RecordType::CORE_SEQUENCE {
        if punches.get(record_type).is_none() {
            notes.push(format!("missing {}", record_type));
            incomplete = true;
        }
    }

    let segments: Vec<(RecordType, RecordType)> =
        if punches.lunch_start.is_none() && punches.lunch_end.is_none() {
            if punches.exit.is_some() {
                notes.push("no lunch break recorded".to_string());
            }
            vec![(RecordType::Entry, RecordType::Exit)]
        } else {
            vec![
                (RecordType::Entry, RecordType::LunchStart),
                (RecordType::LunchEnd, RecordType::Exit),
            ]
        };

    let mut minutes = 0;
    for (from, to) in segments {
        let (Some(start), Some(end)) = (punches.get(from), punches.get(to)) else {
            continue;
        };
        let segment = (end - start).num_minutes();
        if segment < 0 {
            notes.push(format!("{} recorded before {}, segment not counted", to, from));
        } else {
            minutes += segment;
        }
    }

    (minutes, incomplete)
}
