/*!
 * Sentence dispatch.
 *
 * Sends sentences through the translation service with a bounded number in
 * flight and hands each completion to the output assembler, which restores
 * document order. With one request in flight this is the plain sequential
 * loop.
 */

use futures::stream::{self, StreamExt};
use log::debug;
use std::io::Write;
use std::time::{Duration, Instant};

use crate::errors::AppError;
use crate::segmenter::Sentence;
use super::assembly::OutputAssembler;
use super::core::{TranslatedSentence, TranslationOutcome, TranslationService};

/// Counts collected while dispatching a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    /// Sentences written to the sink
    pub sentences: usize,
    /// Sentences translated by the primary backend
    pub translated: usize,
    /// Sentences answered from the cache
    pub cached: usize,
    /// Sentences recovered by the secondary backend
    pub secondary: usize,
    /// Sentences left untranslated
    pub fallbacks: usize,
    /// Wall-clock time spent translating
    pub elapsed: Duration,
}

impl DispatchReport {
    fn record(&mut self, translated: &TranslatedSentence) {
        match translated.outcome {
            TranslationOutcome::Translated => self.translated += 1,
            TranslationOutcome::Cached => self.cached += 1,
            TranslationOutcome::Secondary => self.secondary += 1,
            TranslationOutcome::Fallback => self.fallbacks += 1,
        }
    }
}

/// Drives a document's sentences through a `TranslationService`
pub struct SentenceDispatcher {
    service: TranslationService,
    max_concurrent_requests: usize,
}

impl SentenceDispatcher {
    pub fn new(service: TranslationService, max_concurrent_requests: usize) -> Self {
        Self {
            service,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Translate every sentence and write the results through `assembler`.
    ///
    /// `on_complete` is called once per sentence in completion order with
    /// the number of sentences finished so far and the total.
    pub async fn dispatch<W, F>(
        &self,
        sentences: Vec<Sentence>,
        assembler: &mut OutputAssembler<W>,
        mut on_complete: F,
    ) -> Result<DispatchReport, AppError>
    where
        W: Write,
        F: FnMut(&TranslatedSentence, usize, usize),
    {
        let start = Instant::now();
        let total = sentences.len();
        let mut report = DispatchReport::default();

        debug!(
            "Dispatching {} sentence(s) with {} request(s) in flight",
            total, self.max_concurrent_requests
        );

        let mut completions = stream::iter(sentences)
            .map(|sentence| {
                let service = self.service.clone();
                async move { service.translate_sentence(sentence).await }
            })
            .buffer_unordered(self.max_concurrent_requests);

        let mut finished = 0;
        while let Some(translated) = completions.next().await {
            finished += 1;
            report.record(&translated);
            on_complete(&translated, finished, total);
            assembler.push(translated.index(), translated)?;
        }

        report.sentences = assembler.written();
        report.elapsed = start.elapsed();
        Ok(report)
    }
}
