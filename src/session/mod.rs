// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Keyhint and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Incremental hint selection.
//!
//! A [`SelectionSession`] owns the typed input and the label mapping for one activation of hint
//! mode. The host forwards decoded keys; the session answers with a [`SessionEvent`] describing
//! what the host should do (narrow the markers, activate a target, tear down, or let the key
//! through).

use std::fmt;

use smol_str::SmolStr;

use crate::hints::{self, Alphabet};

/// Decoded key forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A typed character; only alphabet members are consumed.
    Char(char),
    /// Erase the last typed character, or cancel when nothing has been typed.
    Erase,
    Cancel,
    /// Any key without meaning to hint selection.
    Other,
}

/// Outcome of feeding the session one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent<T> {
    /// Still active; only these labels remain visible.
    FilterUpdate(Vec<HintMatch>),
    /// Terminal: the typed input matched a label exactly.
    Activated(T),
    /// Terminal: the session was abandoned.
    Cancelled,
    /// The key means nothing to the session; the host may handle it.
    NotConsumed,
}

/// One visible label with the length of its typed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintMatch {
    /// Position of the target in the order it was passed to `start`/`invalidate`.
    pub index: usize,
    pub label: SmolStr,
    /// Typed prefix length, in characters.
    pub matched: usize,
}

impl HintMatch {
    /// Splits the label into its typed prefix and the remainder still to be typed.
    pub fn split(&self) -> (&str, &str) {
        let at = self
            .label
            .char_indices()
            .nth(self.matched)
            .map(|(idx, _)| idx)
            .unwrap_or(self.label.len());
        self.label.split_at(at)
    }
}

/// Contract violations reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    AlreadyActive,
    NotActive,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyActive => write!(f, "hint session is already active"),
            Self::NotActive => write!(f, "hint session is not active"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Labels zipped with targets, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMapping<T> {
    entries: Vec<(SmolStr, T)>,
}

impl<T> LabelMapping<T> {
    /// Assigns one label per target. Targets beyond the generated labels are left unlabelled,
    /// which only happens with a degraded alphabet.
    pub fn new(targets: Vec<T>, alphabet: &Alphabet) -> Self {
        let labels = hints::generate(targets.len(), alphabet);
        Self { entries: labels.into_iter().zip(targets).collect() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(label, target)| (label.as_str(), target))
    }

    pub fn get(&self, label: &str) -> Option<&T> {
        self.position(label).map(|idx| &self.entries[idx].1)
    }

    /// First exact match in mapping order.
    fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|(candidate, _)| candidate == label)
    }

    fn visible(&self, input: &str) -> Vec<HintMatch> {
        let matched = input.chars().count();
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, (label, _))| label.starts_with(input))
            .map(|(index, (label, _))| HintMatch { index, label: label.clone(), matched })
            .collect()
    }

    fn into_target(self, idx: usize) -> Option<T> {
        self.entries.into_iter().nth(idx).map(|(_, target)| target)
    }
}

#[derive(Debug)]
struct ActiveSession<T> {
    input: String,
    mapping: LabelMapping<T>,
}

#[derive(Debug)]
enum SessionState<T> {
    Inactive,
    Active(ActiveSession<T>),
}

/// Keyboard hint selection state machine over opaque targets `T`.
#[derive(Debug)]
pub struct SelectionSession<T> {
    alphabet: Alphabet,
    state: SessionState<T>,
}

impl<T> SelectionSession<T> {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet, state: SessionState::Inactive }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// Typed input, or `None` while inactive.
    pub fn input(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active(active) => Some(active.input.as_str()),
            SessionState::Inactive => None,
        }
    }

    pub fn mapping(&self) -> Option<&LabelMapping<T>> {
        match &self.state {
            SessionState::Active(active) => Some(&active.mapping),
            SessionState::Inactive => None,
        }
    }

    /// Labels matching the current input; empty while inactive.
    pub fn visible(&self) -> Vec<HintMatch> {
        match &self.state {
            SessionState::Active(active) => active.mapping.visible(&active.input),
            SessionState::Inactive => Vec::new(),
        }
    }

    /// Labels `targets` and enters hint mode.
    pub fn start(&mut self, targets: Vec<T>) -> Result<Vec<HintMatch>, SessionError> {
        if self.is_active() {
            tracing::warn!("hint session start while active");
            return Err(SessionError::AlreadyActive);
        }
        Ok(self.relabel(targets))
    }

    /// Relabels a new target set mid-session and discards any typed input.
    pub fn invalidate(&mut self, targets: Vec<T>) -> Result<Vec<HintMatch>, SessionError> {
        if !self.is_active() {
            tracing::warn!("hint session invalidate while inactive");
            return Err(SessionError::NotActive);
        }
        Ok(self.relabel(targets))
    }

    fn relabel(&mut self, targets: Vec<T>) -> Vec<HintMatch> {
        let target_count = targets.len();
        let mapping = LabelMapping::new(targets, &self.alphabet);
        if mapping.len() < target_count {
            tracing::warn!(
                targets = target_count,
                labels = mapping.len(),
                alphabet = %self.alphabet,
                "alphabet cannot label every target"
            );
        }
        tracing::debug!(targets = target_count, "hint session labelled");

        let visible = mapping.visible("");
        self.state = SessionState::Active(ActiveSession { input: String::new(), mapping });
        visible
    }

    /// Feeds one decoded key.
    pub fn handle_key(&mut self, key: Key) -> Result<SessionEvent<T>, SessionError> {
        let state = std::mem::replace(&mut self.state, SessionState::Inactive);
        let SessionState::Active(mut active) = state else {
            tracing::warn!(?key, "hint key while inactive");
            return Err(SessionError::NotActive);
        };

        let event = match key {
            Key::Erase if !active.input.is_empty() => {
                active.input.pop();
                SessionEvent::FilterUpdate(active.mapping.visible(&active.input))
            }
            Key::Erase | Key::Cancel => {
                tracing::debug!("hint session cancelled");
                return Ok(SessionEvent::Cancelled);
            }
            Key::Char(ch) => match self.alphabet.fold(ch) {
                None => SessionEvent::NotConsumed,
                Some(_) if active.mapping.is_empty() => {
                    tracing::debug!("hint session has no labels; cancelled");
                    return Ok(SessionEvent::Cancelled);
                }
                Some(folded) => {
                    let mut candidate = active.input.clone();
                    candidate.push(folded);

                    if let Some(idx) = active.mapping.position(&candidate) {
                        tracing::debug!(label = %candidate, "hint session activated");
                        return match active.mapping.into_target(idx) {
                            Some(target) => Ok(SessionEvent::Activated(target)),
                            None => Ok(SessionEvent::Cancelled),
                        };
                    }

                    active.input = candidate;
                    let visible = active.mapping.visible(&active.input);
                    if visible.is_empty() {
                        tracing::debug!(input = %active.input, "no hint matches input");
                    }
                    SessionEvent::FilterUpdate(visible)
                }
            },
            Key::Other => SessionEvent::NotConsumed,
        };

        self.state = SessionState::Active(active);
        Ok(event)
    }

    /// Abandons hint mode after a pointer press or focus change in the host.
    pub fn handle_pointer_or_focus_loss(&mut self) -> Result<SessionEvent<T>, SessionError> {
        if !self.is_active() {
            tracing::warn!("hint session pointer or focus loss while inactive");
            return Err(SessionError::NotActive);
        }
        self.state = SessionState::Inactive;
        tracing::debug!("hint session cancelled by pointer or focus loss");
        Ok(SessionEvent::Cancelled)
    }
}
