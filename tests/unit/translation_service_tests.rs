/*!
 * Tests for the translation service, sentence dispatch and ordered output
 */

use std::sync::Arc;

use hindi_translate::translation::{
    OutputAssembler, SentenceDispatcher, TranslationCache, TranslationOutcome, TranslationService,
};

use crate::common::mock_translators::{self, MockTranslator};

fn assembled(output: Vec<u8>) -> String {
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_translate_sentence_withWorkingBackend_shouldTranslate() {
    let service = mock_translators::service_with(Arc::new(MockTranslator::working()), None);
    let sentence = mock_translators::sentences(&["भारत।"]).remove(0);

    let translated = service.translate_sentence(sentence).await;
    assert_eq!(translated.translation, "EN:भारत।");
    assert_eq!(translated.outcome, TranslationOutcome::Translated);
    assert_eq!(translated.index(), 0);
    assert!(!translated.is_fallback());
}

#[tokio::test]
async fn test_dispatch_withFailureAtOneIndex_shouldKeepOriginalInPlace() {
    let texts = ["पहला।", "दूसरा।", "तीसरा।"];
    let primary = Arc::new(MockTranslator::failing_on(&["दूसरा।"]));
    let service = mock_translators::service_with(primary, None);
    let dispatcher = SentenceDispatcher::new(service, 1);
    let mut assembler = OutputAssembler::new(Vec::new());

    let report = dispatcher
        .dispatch(mock_translators::sentences(&texts), &mut assembler, |_, _, _| {})
        .await
        .unwrap();

    assert_eq!(report.sentences, 3);
    assert_eq!(report.translated, 2);
    assert_eq!(report.fallbacks, 1);
    assert_eq!(
        assembled(assembler.finish().unwrap()),
        "EN:पहला। दूसरा। EN:तीसरा।"
    );
}

#[tokio::test]
async fn test_dispatch_withEveryCallFailing_shouldEchoSource() {
    let service = mock_translators::service_with(Arc::new(MockTranslator::failing()), None);
    let dispatcher = SentenceDispatcher::new(service, 1);
    let mut assembler = OutputAssembler::new(Vec::new());

    let report = dispatcher
        .dispatch(mock_translators::sentences(&["क।", "ख!"]), &mut assembler, |_, _, _| {})
        .await
        .unwrap();

    assert_eq!(report.fallbacks, 2);
    assert_eq!(assembled(assembler.finish().unwrap()), "क। ख!");
}

#[tokio::test]
async fn test_dispatch_withSecondaryBackend_shouldRecoverFailures() {
    let primary = Arc::new(MockTranslator::failing());
    let secondary = Arc::new(MockTranslator::working());
    let secondary_calls = secondary.tracker();
    let service = mock_translators::service_with(primary, Some(secondary));
    let dispatcher = SentenceDispatcher::new(service, 1);
    let mut assembler = OutputAssembler::new(Vec::new());

    let report = dispatcher
        .dispatch(mock_translators::sentences(&["क।", "ख।"]), &mut assembler, |_, _, _| {})
        .await
        .unwrap();

    assert_eq!(report.secondary, 2);
    assert_eq!(report.fallbacks, 0);
    assert_eq!(secondary_calls.lock().calls, vec!["क।", "ख।"]);
    assert_eq!(assembled(assembler.finish().unwrap()), "EN:क। EN:ख।");
}

#[tokio::test]
async fn test_dispatch_withSequentialLimit_shouldCallBackendInOrder() {
    let texts = ["एक।", "दो।", "तीन।", "चार।"];
    let primary = Arc::new(MockTranslator::staggered(&texts));
    let calls = primary.tracker();
    let service = mock_translators::service_with(primary, None);
    let dispatcher = SentenceDispatcher::new(service, 1);
    let mut assembler = OutputAssembler::new(Vec::new());

    let mut completion_order = Vec::new();
    dispatcher
        .dispatch(mock_translators::sentences(&texts), &mut assembler, |translated, _, _| {
            completion_order.push(translated.index());
        })
        .await
        .unwrap();

    assert_eq!(calls.lock().calls, texts);
    assert_eq!(completion_order, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_dispatch_withConcurrentRequests_shouldPreserveDocumentOrder() {
    let texts = ["एक।", "दो।", "तीन।", "चार।", "पाँच।"];
    let service = mock_translators::service_with(Arc::new(MockTranslator::staggered(&texts)), None);
    let dispatcher = SentenceDispatcher::new(service, 5);
    let mut assembler = OutputAssembler::new(Vec::new());

    let mut completion_order = Vec::new();
    let report = dispatcher
        .dispatch(mock_translators::sentences(&texts), &mut assembler, |translated, finished, total| {
            assert_eq!(total, 5);
            assert_eq!(finished, completion_order.len() + 1);
            completion_order.push(translated.index());
        })
        .await
        .unwrap();

    // Later sentences finish first, the file is still in document order
    assert_eq!(completion_order, vec![4, 3, 2, 1, 0]);
    assert_eq!(report.sentences, 5);
    assert_eq!(
        assembled(assembler.finish().unwrap()),
        "EN:एक। EN:दो। EN:तीन। EN:चार। EN:पाँच।"
    );
}

#[tokio::test]
async fn test_dispatch_withRepeatedSentences_shouldCallBackendOnce() {
    let primary = Arc::new(MockTranslator::working());
    let calls = primary.tracker();
    let service = mock_translators::service_with(primary, None);
    let dispatcher = SentenceDispatcher::new(service, 1);
    let mut assembler = OutputAssembler::new(Vec::new());

    let report = dispatcher
        .dispatch(mock_translators::sentences(&["जय।", "जय।", "जय।"]), &mut assembler, |_, _, _| {})
        .await
        .unwrap();

    assert_eq!(calls.lock().calls.len(), 1);
    assert_eq!(report.translated, 1);
    assert_eq!(report.cached, 2);
    assert_eq!(dispatcher.service().cache().stats().0, 2);
}

#[tokio::test]
async fn test_dispatch_withCacheDisabled_shouldCallBackendEveryTime() {
    let primary = Arc::new(MockTranslator::working());
    let calls = primary.tracker();
    let service = TranslationService::with_translators(primary, None, TranslationCache::new(false), "hi", "en");
    assert!(!service.cache().is_enabled());
    let dispatcher = SentenceDispatcher::new(service, 1);
    let mut assembler = OutputAssembler::new(Vec::new());

    dispatcher
        .dispatch(mock_translators::sentences(&["जय।", "जय।"]), &mut assembler, |_, _, _| {})
        .await
        .unwrap();

    assert_eq!(calls.lock().calls.len(), 2);
}

#[tokio::test]
async fn test_dispatch_withNoSentences_shouldWriteNothing() {
    let service = mock_translators::service_with(Arc::new(MockTranslator::working()), None);
    let dispatcher = SentenceDispatcher::new(service, 0);
    let mut assembler = OutputAssembler::new(Vec::new());

    let report = dispatcher
        .dispatch(Vec::new(), &mut assembler, |_, _, _| {})
        .await
        .unwrap();

    assert_eq!(report.sentences, 0);
    assert!(assembler.finish().unwrap().is_empty());
}

#[test]
fn test_cache_withSharedClone_shouldShareEntriesAndCounters() {
    let cache = TranslationCache::new(true);
    let clone = cache.clone();

    clone.store("भारत।", "hi", "en", "India.");
    assert_eq!(cache.get("भारत।", "hi", "en").as_deref(), Some("India."));
    assert_eq!(cache.get("भारत।", "hi", "fr"), None);

    let (hits, misses, _) = clone.stats();
    assert_eq!(hits, 1);
    assert_eq!(misses, 1);

    cache.clear();
    assert!(clone.is_empty());
}
