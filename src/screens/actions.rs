//! Semantic action IDs for screen click targets.

// ── Shared ───────────────────────────────────────────────────
pub const BACK: u16 = 1;
pub const SUBMIT: u16 = 2;
pub const SKIP: u16 = 3;
pub const LOGOUT: u16 = 4;

// ── Forms ────────────────────────────────────────────────────
pub const FIELD_BASE: u16 = 10; // +field index 0..19

// ── Menus (login selection, profile selection, mentors) ──────
pub const OPTION_BASE: u16 = 40; // +option index 0..9

// ── Personality profile ──────────────────────────────────────
pub const QUESTION_BASE: u16 = 50; // +question index 0..3
pub const ANSWER_BASE: u16 = 54; // +answer value 1..5

// ── Candidate page ───────────────────────────────────────────
pub const APPLY_BASE: u16 = 60; // +job index 0..9

// ── Company dashboard ────────────────────────────────────────
pub const TAB_BASE: u16 = 80; // +tab index 0..2
pub const POST_ANOTHER: u16 = 90;
