/*!
 * Ordered output assembly.
 *
 * The assembler is the only writer of the output sink. Translations may
 * arrive in any order; each is tagged with its sentence index, held in a
 * reorder buffer until every earlier index has been written, then flushed.
 */

use log::trace;
use std::collections::BTreeMap;
use std::io::Write;

use crate::errors::AppError;
use super::core::TranslatedSentence;

/// Separator written between consecutive translations
pub const SENTENCE_SEPARATOR: &str = " ";

/// Writes translations to a sink in original sentence order
pub struct OutputAssembler<W: Write> {
    sink: W,
    next_index: usize,
    pending: BTreeMap<usize, TranslatedSentence>,
    written: usize,
}

impl<W: Write> OutputAssembler<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            next_index: 0,
            pending: BTreeMap::new(),
            written: 0,
        }
    }

    /// Accept the translation for sentence `index`. Writes it, and any
    /// buffered successors, once all earlier indices are written.
    pub fn push(&mut self, index: usize, translated: TranslatedSentence) -> Result<(), AppError> {
        if index < self.next_index || self.pending.contains_key(&index) {
            return Err(AppError::Assembly(format!(
                "sentence {} was delivered twice",
                index
            )));
        }

        self.pending.insert(index, translated);

        let mut flushed = false;
        while let Some(ready) = self.pending.remove(&self.next_index) {
            self.write_one(&ready)?;
            self.next_index += 1;
            flushed = true;
        }

        if flushed {
            self.sink.flush()?;
        } else {
            trace!(
                "Buffered sentence {} while waiting for {}",
                index, self.next_index
            );
        }

        Ok(())
    }

    fn write_one(&mut self, translated: &TranslatedSentence) -> Result<(), AppError> {
        if self.written > 0 {
            self.sink.write_all(SENTENCE_SEPARATOR.as_bytes())?;
        }
        self.sink.write_all(translated.translation.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Number of translations written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Number of translations held back waiting for an earlier index
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Finish assembly and hand back the sink. Fails if a gap remains.
    pub fn finish(mut self) -> Result<W, AppError> {
        if let Some(first_waiting) = self.pending.keys().next() {
            return Err(AppError::Assembly(format!(
                "sentence {} never arrived ({} later sentence(s) buffered, first is {})",
                self.next_index,
                self.pending.len(),
                first_waiting
            )));
        }

        self.sink.flush()?;
        Ok(self.sink)
    }
}
