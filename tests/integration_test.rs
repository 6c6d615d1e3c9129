/// Integration tests for beacon's assembly and persistence logic.
use beacon_agent::{
    root_agent, RETRIEVAL_CAPABILITY_NAME, ROOT_AGENT_NAME, SEARCH_DELEGATE_NAME,
};
use beacon_config::{EnvFile, Settings};
use beacon_corpus::default_documents;
use beacon_vertex::engine_payload;

const CORPUS: &str = "projects/demo/locations/us-central1/ragCorpora/123";

fn settings(rag_corpus: Option<&str>) -> Settings {
    Settings::from_lookup(|key| match key {
        "RAG_CORPUS" => rag_corpus.map(str::to_string),
        _ => None,
    })
}

#[test]
fn search_only_agent_has_exactly_the_delegate() {
    let agent = root_agent(&settings(None));
    assert_eq!(agent.name, ROOT_AGENT_NAME);
    assert_eq!(agent.capability_names(), vec![SEARCH_DELEGATE_NAME]);
}

#[test]
fn corpus_backed_agent_lists_retrieval_first() {
    let agent = root_agent(&settings(Some(CORPUS)));
    assert_eq!(
        agent.capability_names(),
        vec![RETRIEVAL_CAPABILITY_NAME, SEARCH_DELEGATE_NAME]
    );
}

#[test]
fn capability_names_are_unique_in_both_modes() {
    for corpus in [None, Some(CORPUS)] {
        let agent = root_agent(&settings(corpus));
        let mut names = agent.capability_names();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), agent.capabilities.len());
    }
}

#[test]
fn deployment_payload_round_trips_the_configuration() {
    let agent = root_agent(&settings(Some(CORPUS)));
    let payload = engine_payload(
        &agent,
        "Crisis Response Agent",
        "Agent providing crisis information using curated retrieval and web search.",
        "gs://staging",
    );
    assert_eq!(payload["spec"]["agent"]["model"], "gemini-2.0-flash");
    assert_eq!(
        payload["spec"]["agent"]["tools"][0]["ragResources"][0]["ragCorpus"],
        CORPUS
    );
}

#[test]
fn instruction_policy_carries_the_safety_rules() {
    let agent = root_agent(&settings(None));
    // Life-threatening situations route to local emergency services, and the
    // assistant must disclose that it is not a substitute for them.
    assert!(agent.instruction.contains("contact local emergency services"));
    assert!(agent
        .instruction
        .contains("not a substitute for official emergency services"));
    assert!(agent.instruction.contains("ask for clarification"));
}

#[test]
fn env_file_persists_corpus_and_engine_identity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");

    let mut env = EnvFile::load(&path).unwrap();
    assert!(env.set("RAG_CORPUS", CORPUS));
    assert!(env.set(
        "AGENT_ENGINE_ID",
        "projects/demo/locations/us-central1/reasoningEngines/9"
    ));
    env.save().unwrap();

    // Second run: same values, nothing to write.
    let mut env = EnvFile::load(&path).unwrap();
    assert!(!env.set("RAG_CORPUS", CORPUS));

    let s = Settings::from_lookup(|key| env.get(key).map(str::to_string));
    assert_eq!(s.rag_corpus.as_deref(), Some(CORPUS));
    assert!(s.agent_engine_id.is_some());

    // Delete clears the deployed identity but leaves the corpus binding.
    assert!(env.unset("AGENT_ENGINE_ID"));
    env.save().unwrap();
    let env = EnvFile::load(&path).unwrap();
    assert_eq!(env.get("AGENT_ENGINE_ID"), None);
    assert_eq!(env.get("RAG_CORPUS"), Some(CORPUS));
}

#[test]
fn built_in_document_set_is_uploadable() {
    let docs = default_documents();
    assert_eq!(docs.len(), 2);
    for doc in &docs {
        assert!(doc.url.is_some(), "built-in documents must carry a URL");
        assert!(doc.filename.ends_with(".pdf"));
    }
}
