// Static PHI audit: every tracing call under src/ is parsed and rejected if
// it can put free text (complaints, transcripts, sentences, spans) into an
// event. Logs must only ever see counts, ids and categories.
