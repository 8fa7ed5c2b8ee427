//! Timeline Extractor: turns narrative text into an ordered list of
//! [`TemporalEvent`]s. The hardest module in the engine, grounded on
//! `examples/original_source/src/coreason_chronos/timeline_extractor.py` and
//! its three test files (`tests/test_timeline_extractor_{anchor,fuzzy,duration}.py`),
//! which describe a later, anchor-resolving evolution of the extractor than
//! the single-pass version in that exact source file.
//!
//! Four passes over the text (`spec.md` §4.5):
//! 1. standard extraction: every date-shaped phrase `date_phrase::scan`
//!    resolves directly, re-located via a monotonic cursor;
//! 2. anchor-candidate detection: `anchor::scan` finds
//!    "`<value> <unit> (after|before) <phrase>`" fragments;
//! 3. overlap pruning: standard events whose span overlaps an anchor
//!    candidate's span are discarded (the date parser misread the anchor
//!    fragment as a standalone date);
//! 4. fixed-point anchor resolution: anchors resolve against a resolved set
//!    that grows as the pass proceeds, via `fuzzy::token_set_ratio`.
//!
//! A final duration pass then attaches `duration_minutes`/`ends_at` to any
//! event (standard or anchor-derived) that has a duration fragment nearby.

mod anchor;
mod date_phrase;
mod fuzzy;
mod text;

use crate::config::ExtractorConfig;
use crate::duration::{self, CalendarDelta, DurationUnit};
use crate::model::{Granularity, TemporalEvent};
use anchor::{AnchorCandidate, Direction};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// An event as resolved internally, before being frozen into a
/// [`TemporalEvent`]. Not exposed publicly; `span` in particular only makes
/// sense while we still hold the source text.
#[derive(Debug, Clone)]
struct ResolvedMeta {
    description: String,
    timestamp: DateTime<Utc>,
    granularity: Granularity,
    source_snippet: String,
    span: (usize, usize),
}

pub struct TimelineExtractor {
    config: ExtractorConfig,
}

impl Default for TimelineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineExtractor {
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extracts every resolvable event from `text` relative to
    /// `reference_date`. Never fails: `reference_date`'s type
    /// (`DateTime<Utc>`) already guarantees timezone-awareness, and every
    /// other failure mode (an anchor that never resolves, a snippet that
    /// can't be re-located) is logged and silently dropped, not raised
    /// (`spec.md` §7).
    pub fn extract_events(&self, text: &str, reference_date: DateTime<Utc>) -> Vec<TemporalEvent> {
        let standard = self.pass1_standard(text, reference_date);
        let anchor_candidates = anchor::scan(text);
        let pruned = prune_overlapping(standard, &anchor_candidates);
        let resolved = self.resolve_anchors(text, anchor_candidates, pruned);
        let with_durations = self.attach_durations(text, resolved);

        let mut events: Vec<TemporalEvent> = with_durations
            .into_iter()
            .filter_map(|m| {
                let description = m.description.clone();
                match TemporalEvent::new(
                    Uuid::new_v4(),
                    m.description,
                    m.timestamp,
                    m.granularity,
                    m.duration_minutes,
                    m.ends_at,
                    m.source_snippet,
                ) {
                    Ok(event) => Some(event),
                    Err(error) => {
                        tracing::warn!(description, %error, "dropping internally resolved event that failed its own invariants");
                        None
                    }
                }
            })
            .collect();

        events.sort_by(|a, b| a.timestamp().cmp(&b.timestamp()));
        events
    }

    /// Pass 1: every standalone date phrase in `text`.
    fn pass1_standard(&self, text: &str, reference: DateTime<Utc>) -> Vec<ResolvedMeta> {
        let hits = date_phrase::scan(text, reference);
        let mut cursor = 0usize;
        let mut metas = Vec::with_capacity(hits.len());

        for hit in hits {
            let Some((start, end)) = locate(text, &hit.snippet, cursor) else {
                tracing::debug!(snippet = hit.snippet, "could not re-locate date phrase snippet");
                continue;
            };
            cursor = end;

            let (ctx_start, ctx_end) = text::window(text, start, end, self.config.context_window);
            let description = text::normalize_whitespace(&text[ctx_start..ctx_end]);
            let granularity = classify_granularity(&hit.snippet, hit.timestamp);

            metas.push(ResolvedMeta {
                description,
                timestamp: hit.timestamp,
                granularity,
                source_snippet: hit.snippet,
                span: (start, end),
            });
        }

        metas
    }

    /// Pass 4: bounded fixed-point resolution of anchor candidates against a
    /// resolved set that grows as the pass proceeds, enabling chained
    /// references ("3 days after Middle" where Middle is itself anchored)
    /// within a single sweep (`spec.md` §4.5.4).
    fn resolve_anchors(
        &self,
        text: &str,
        anchor_candidates: Vec<AnchorCandidate>,
        mut resolved: Vec<ResolvedMeta>,
    ) -> Vec<ResolvedMeta> {
        let mut unresolved = anchor_candidates;
        let max_iterations = unresolved.len() + 1;

        for _ in 0..max_iterations {
            if unresolved.is_empty() {
                break;
            }
            let mut progress = false;
            let mut next_round = Vec::new();

            for candidate in unresolved.drain(..) {
                match self.best_match(text, &candidate, &resolved) {
                    Some(best_idx) => {
                        let derived = derive_event(text, &candidate, &resolved[best_idx], &self.config);
                        resolved.push(derived);
                        progress = true;
                    }
                    None => next_round.push(candidate),
                }
            }

            unresolved = next_round;
            if !progress {
                break;
            }
        }

        for leftover in &unresolved {
            tracing::debug!(
                phrase = leftover.anchor_phrase,
                "anchor candidate never resolved against any known event"
            );
        }

        resolved
    }

    /// Scores every already-resolved event against `candidate`'s anchor
    /// phrase and returns the index of the best one clearing the fuzzy-match
    /// threshold, preferring the highest score and, among ties, the nearest
    /// by character distance (`spec.md` §4.5.4).
    fn best_match(&self, text: &str, candidate: &AnchorCandidate, resolved: &[ResolvedMeta]) -> Option<usize> {
        let mut scored: Vec<(f64, i64, usize)> = Vec::new();

        for (idx, meta) in resolved.iter().enumerate() {
            let masked = masked_context(text, meta, candidate.span, self.config.context_window);
            let score = fuzzy::token_set_ratio(&candidate.anchor_phrase, &masked)
                .max(fuzzy::token_set_ratio(&candidate.anchor_phrase, &meta.source_snippet));

            if score >= self.config.fuzzy_match_threshold {
                scored.push((score, distance(candidate.span, meta.span), idx));
            }
        }

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.first().map(|&(_, _, idx)| idx)
    }

    /// Final pass: attaches a nearby duration fragment to every resolved
    /// event, if one survives the forbidden-range and intervening-range
    /// checks (`spec.md` §4.5.1 step 6, §4.5.5).
    fn attach_durations(&self, text: &str, resolved: Vec<ResolvedMeta>) -> Vec<ResolvedEvent> {
        let spans: Vec<(usize, usize)> = resolved.iter().map(|m| m.span).collect();

        resolved
            .into_iter()
            .enumerate()
            .map(|(i, meta)| {
                let forbidden: Vec<(usize, usize)> = spans
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, s)| *s)
                    .collect();

                let duration = find_duration(text, meta.span, &forbidden, self.config.duration_search_window);
                let (duration_minutes, ends_at) = match duration {
                    Some((value, unit)) => {
                        // `ends_at` is derived from the same floored `minutes`
                        // stored in `duration_minutes`, not from the exact
                        // delta, so the two always agree. A sub-minute fixed
                        // duration (e.g. "45 seconds") floors to 0 minutes and
                        // is dropped below, rather than producing an `ends_at`
                        // inconsistent with the stored minute count.
                        let minutes = duration::total_minutes(value, unit, meta.timestamp);
                        let ends_at = meta.timestamp + chrono::Duration::minutes(minutes);
                        if ends_at > meta.timestamp {
                            (Some(minutes), Some(ends_at))
                        } else {
                            (None, None)
                        }
                    }
                    None => (None, None),
                };

                ResolvedEvent {
                    description: meta.description,
                    timestamp: meta.timestamp,
                    granularity: meta.granularity,
                    source_snippet: meta.source_snippet,
                    duration_minutes,
                    ends_at,
                }
            })
            .collect()
    }
}

/// A fully resolved event, ready to become a [`TemporalEvent`].
struct ResolvedEvent {
    description: String,
    timestamp: DateTime<Utc>,
    granularity: Granularity,
    source_snippet: String,
    duration_minutes: Option<i64>,
    ends_at: Option<DateTime<Utc>>,
}

/// Finds `snippet` in `text`, searching from `cursor` forward first and
/// falling back to a search from the start of `text`, for deterministic span
/// assignment when the same snippet literally occurs more than once
/// (`spec.md` §4.5.1 step 3).
fn locate(text: &str, snippet: &str, cursor: usize) -> Option<(usize, usize)> {
    if let Some(pos) = text.get(cursor..).and_then(|s| s.find(snippet)) {
        let start = cursor + pos;
        return Some((start, start + snippet.len()));
    }
    text.find(snippet).map(|pos| (pos, pos + snippet.len()))
}

/// `DATE_ONLY` when the phrase carried no explicit time component and the
/// resolved timestamp lands on local midnight; `PRECISE` otherwise. A
/// snippet that spells out "00:00" explicitly is still `PRECISE`; it's not
/// a missing time, it's a stated one (`spec.md` §4.5.1 step 5, §9 open
/// question).
fn classify_granularity(snippet: &str, timestamp: DateTime<Utc>) -> Granularity {
    use chrono::Timelike;
    let midnight = timestamp.hour() == 0 && timestamp.minute() == 0 && timestamp.second() == 0;
    let states_midnight_explicitly = snippet.contains("00:00");
    if midnight && !states_midnight_explicitly {
        Granularity::DateOnly
    } else {
        Granularity::Precise
    }
}

/// Drops every Pass 1 event whose span overlaps an anchor candidate's span:
/// the date parser misread part of an anchor phrase as a standalone date
/// (`spec.md` §4.5.3).
fn prune_overlapping(standard: Vec<ResolvedMeta>, anchors: &[AnchorCandidate]) -> Vec<ResolvedMeta> {
    standard
        .into_iter()
        .filter(|m| !anchors.iter().any(|c| text::overlaps(m.span, c.span)))
        .collect()
}

/// Builds the context window around `meta`'s own span, masking out any
/// overlap with the anchor candidate's span so a candidate never fuzzy-matches
/// itself through its own surrounding context (`spec.md` §4.5.4).
fn masked_context(text: &str, meta: &ResolvedMeta, candidate_span: (usize, usize), radius: usize) -> String {
    let (ctx_start, ctx_end) = text::window(text, meta.span.0, meta.span.1, radius);

    if !text::overlaps((ctx_start, ctx_end), candidate_span) {
        return meta.description.clone();
    }

    let ov_start = candidate_span.0.max(ctx_start);
    let ov_end = candidate_span.1.min(ctx_end);
    let before = &text[ctx_start..ov_start];
    let after = &text[ov_end..ctx_end];
    text::normalize_whitespace(&format!("{before} {after}"))
}

/// `max(0, signed_gap(candidate_span, event_span))` in characters.
fn distance(candidate_span: (usize, usize), event_span: (usize, usize)) -> i64 {
    if event_span.1 <= candidate_span.0 {
        (candidate_span.0 - event_span.1) as i64
    } else if event_span.0 >= candidate_span.1 {
        (event_span.0 - candidate_span.1) as i64
    } else {
        0
    }
}

fn derive_event(
    text: &str,
    candidate: &AnchorCandidate,
    anchor_meta: &ResolvedMeta,
    config: &ExtractorConfig,
) -> ResolvedMeta {
    let delta = duration::parse(candidate.value, candidate.unit);
    let timestamp = apply_directional(delta, anchor_meta.timestamp, candidate.direction);
    let truncated: String = anchor_meta.description.chars().take(20).collect();
    let description = format!("Derived from anchor '{}' linked to {}…", candidate.full_match, truncated);

    let _ = text; // span is already final text coordinates, nothing further to slice here
    let _ = config;

    ResolvedMeta {
        description,
        timestamp,
        granularity: anchor_meta.granularity,
        source_snippet: candidate.full_match.clone(),
        span: candidate.span,
    }
}

fn apply_directional(delta: CalendarDelta, base: DateTime<Utc>, direction: Direction) -> DateTime<Utc> {
    match direction {
        Direction::After => duration::apply(delta, base),
        Direction::Before => match delta {
            CalendarDelta::Fixed(d) => base - d,
            CalendarDelta::Calendar { months } => duration::apply(CalendarDelta::Calendar { months: -months }, base),
        },
    }
}

static DURATION_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:for|lasting|spanning)\s+(\d+(?:\.\d+)?)\s+(year|month|week|day|hour|minute|second)s?\b")
        .expect("duration-fragment regex is a fixed, compile-time-checked pattern")
});

/// Searches a `±radius` window around `span` for a duration fragment,
/// excluding any match that overlaps a forbidden span or is separated from
/// `span` by one (`spec.md` §4.5.5), and returns the closest surviving match.
fn find_duration(
    text: &str,
    span: (usize, usize),
    forbidden: &[(usize, usize)],
    radius: usize,
) -> Option<(f64, DurationUnit)> {
    let (ctx_start, ctx_end) = text::window(text, span.0, span.1, radius);
    let window_text = &text[ctx_start..ctx_end];

    let mut candidates: Vec<(i64, f64, DurationUnit)> = Vec::new();
    for caps in DURATION_FRAGMENT.captures_iter(window_text) {
        let whole = caps.get(0).expect("group 0 always matches");
        let match_span = (ctx_start + whole.start(), ctx_start + whole.end());

        if text::overlaps(match_span, span) {
            continue;
        }
        if forbidden.iter().any(|f| text::overlaps(*f, match_span)) {
            continue;
        }
        if is_intervening(match_span, span, forbidden) {
            continue;
        }

        let Ok(value) = caps[1].parse::<f64>() else {
            continue;
        };
        let Some(unit) = DurationUnit::parse_str(&caps[2]) else {
            continue;
        };

        candidates.push((distance(match_span, span), value, unit));
    }

    candidates.sort_by_key(|c| c.0);
    candidates.into_iter().next().map(|(_, v, u)| (v, u))
}

/// Whether some other known span lies strictly between `match_span` and
/// `event_span`, which disqualifies the match from being attributed to that
/// event (`spec.md` §4.5.5, "Case 2: Match < Forbidden < Snippet").
fn is_intervening(match_span: (usize, usize), event_span: (usize, usize), forbidden: &[(usize, usize)]) -> bool {
    let (gap_lo, gap_hi) = if match_span.1 <= event_span.0 {
        (match_span.1, event_span.0)
    } else if event_span.1 <= match_span.0 {
        (event_span.1, match_span.0)
    } else {
        return false;
    };
    if gap_lo >= gap_hi {
        return false;
    }
    forbidden.iter().any(|f| text::overlaps(*f, (gap_lo, gap_hi)))
}
