// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Misuse of the popover API that is reported instead of recovered from.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    /// A popover wraps exactly one trigger element.
    #[error("a popover needs exactly one trigger element, got {0}")]
    TriggerCount(usize),
}
