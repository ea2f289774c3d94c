//! Medication block assembly.
//!
//! A reducer over classified lines with one piece of state: the medication
//! currently being accumulated. A new start line or the end of input flushes
//! it to the output list.

use super::patterns::{find_dosage, find_duration, find_frequency, strip_ordinal};
use super::types::{ClassifiedLine, LineKind, Medication, DEFAULT_DIRECTIONS, DEFAULT_DURATION};

/// A medication whose frequency and duration may still be unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DraftMedication {
    name: String,
    dosage: String,
    frequency: Option<String>,
    duration: Option<String>,
    instructions: String,
}

impl DraftMedication {
    fn from_start_line(line: &str) -> Self {
        let (name, dosage) = match find_dosage(line) {
            Some(dosage) => (
                strip_ordinal(&line[..dosage.start]).trim(),
                dosage.text.to_string(),
            ),
            None => (strip_ordinal(line).trim(), DEFAULT_DIRECTIONS.to_string()),
        };

        Self {
            name: name.to_string(),
            dosage,
            frequency: None,
            duration: None,
            instructions: line.to_string(),
        }
    }

    fn absorb(&mut self, line: &str) {
        self.instructions.push('\n');
        self.instructions.push_str(line);

        if self.frequency.is_none() {
            self.frequency = find_frequency(line).map(str::to_string);
        }
        if self.duration.is_none() {
            self.duration = find_duration(line).map(str::to_string);
        }
    }

    fn finish(self) -> Medication {
        Medication {
            name: self.name,
            dosage: self.dosage,
            frequency: self.frequency.unwrap_or_else(|| DEFAULT_DIRECTIONS.to_string()),
            duration: self.duration.unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            instructions: strip_ordinal(&self.instructions).to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MedicationAssembler {
    current: Option<DraftMedication>,
    done: Vec<Medication>,
    orphaned: usize,
}

impl MedicationAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &ClassifiedLine) {
        if line.kind.is_inert() {
            return;
        }
        if line.kind == LineKind::MedicationStart {
            self.flush();
            self.current = Some(DraftMedication::from_start_line(&line.content));
            return;
        }
        match self.current.as_mut() {
            Some(draft) => draft.absorb(&line.content),
            None => self.orphaned += 1,
        }
    }

    /// Continuation lines seen before any medication start.
    pub fn orphaned_lines(&self) -> usize {
        self.orphaned
    }

    /// Flush the open block and return medications in source order.
    pub fn finish(mut self) -> Vec<Medication> {
        self.flush();
        self.done
    }

    fn flush(&mut self) {
        if let Some(draft) = self.current.take() {
            self.done.push(draft.finish());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(content: &str, kind: LineKind) -> ClassifiedLine {
        ClassifiedLine {
            content: content.to_string(),
            kind,
        }
    }

    fn start(content: &str) -> ClassifiedLine {
        line(content, LineKind::MedicationStart)
    }

    fn cont(content: &str) -> ClassifiedLine {
        line(content, LineKind::Continuation)
    }

    fn assemble(lines: &[ClassifiedLine]) -> Vec<Medication> {
        let mut assembler = MedicationAssembler::new();
        for line in lines {
            assembler.push(line);
        }
        assembler.finish()
    }

    #[test]
    fn start_line_splits_name_and_dosage() {
        let meds = assemble(&[start("1. Amoxicillin 500mg")]);
        assert_eq!(meds.len(), 1);
        assert_eq!(meds[0].name, "Amoxicillin");
        assert_eq!(meds[0].dosage, "500mg");
        assert_eq!(meds[0].frequency, DEFAULT_DIRECTIONS);
        assert_eq!(meds[0].duration, DEFAULT_DURATION);
        assert_eq!(meds[0].instructions, "Amoxicillin 500mg");
    }

    #[test]
    fn start_without_dosage_uses_whole_line() {
        let meds = assemble(&[start("2. Ibuprofen gel")]);
        assert_eq!(meds[0].name, "Ibuprofen gel");
        assert_eq!(meds[0].dosage, DEFAULT_DIRECTIONS);
    }

    #[test]
    fn continuation_fills_frequency_and_duration_once() {
        let meds = assemble(&[
            start("1. Amoxicillin 500mg"),
            cont("Take 1 tablet twice daily for 7 days"),
            cont("or once daily for 3 days if tolerated"),
        ]);
        assert_eq!(meds[0].frequency, "twice daily");
        assert_eq!(meds[0].duration, "for 7 days");
        assert_eq!(
            meds[0].instructions,
            "Amoxicillin 500mg\nTake 1 tablet twice daily for 7 days\nor once daily for 3 days if tolerated"
        );
    }

    #[test]
    fn fields_can_come_from_different_lines() {
        let meds = assemble(&[
            start("Omeprazole 20mg"),
            cont("Take 1 capsule once daily"),
            cont("Continue for 14 days"),
        ]);
        assert_eq!(meds[0].frequency, "once daily");
        assert_eq!(meds[0].duration, "Continue for 14 days");
    }

    #[test]
    fn new_start_flushes_previous() {
        let meds = assemble(&[
            start("1. Amoxicillin 500mg"),
            cont("twice daily"),
            start("2. Paracetamol 500mg"),
            cont("every 6 hours"),
        ]);
        let names: Vec<&str> = meds.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Amoxicillin", "Paracetamol"]);
        assert_eq!(meds[0].frequency, "twice daily");
        assert_eq!(meds[1].frequency, "every 6 hours");
    }

    #[test]
    fn orphaned_continuations_are_dropped() {
        let mut assembler = MedicationAssembler::new();
        assembler.push(&cont("Thank you for visiting our clinic."));
        assembler.push(&start("Amoxicillin 500mg"));
        assert_eq!(assembler.orphaned_lines(), 1);
        let meds = assembler.finish();
        assert_eq!(meds.len(), 1);
        assert_eq!(meds[0].instructions, "Amoxicillin 500mg");
    }

    #[test]
    fn inert_lines_do_not_touch_state() {
        let meds = assemble(&[
            start("1. Amoxicillin 500mg"),
            line("Dr. Sarah Johnson", LineKind::DoctorInfo),
            line("Date: 1/1/2024", LineKind::DateInfo),
            line("Rx:", LineKind::Noise),
            cont("twice daily"),
        ]);
        assert_eq!(meds[0].instructions, "Amoxicillin 500mg\ntwice daily");
    }

    #[test]
    fn decimal_dosage_splits_cleanly() {
        let meds = assemble(&[start("1. Salbutamol 2.5mg"), cont("Inhale every 6 hours")]);
        assert_eq!(meds[0].name, "Salbutamol");
        assert_eq!(meds[0].dosage, "2.5mg");
        assert_eq!(meds[0].frequency, "every 6 hours");
    }

    #[test]
    fn last_block_is_flushed_at_end() {
        let meds = assemble(&[start("1. A 5mg"), start("2. B 10mg"), start("3. C 20mg")]);
        assert_eq!(meds.len(), 3);
        assert_eq!(meds[2].dosage, "20mg");
    }

    #[test]
    fn no_start_lines_yields_empty() {
        assert!(assemble(&[cont("Thank you for visiting our clinic.")]).is_empty());
        assert!(assemble(&[]).is_empty());
    }
}
