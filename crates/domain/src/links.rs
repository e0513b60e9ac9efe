// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Base URL for every checkpoint share link.
pub const SHARE_LINK_BASE: &str = "https://invite2me.com";

/// The path segment a share link is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    /// Entry checkpoints created together with a gate.
    Gate,
    /// Every other checkpoint.
    Checkpoint,
}

impl LinkScope {
    /// Returns the path segment for this scope.
    #[must_use]
    pub const fn segment(&self) -> &'static str {
        match self {
            Self::Gate => "gate",
            Self::Checkpoint => "checkpoint",
        }
    }
}

/// Lower-cases `name` and collapses each run of whitespace into one hyphen.
#[must_use]
pub fn slug(name: &str) -> String {
    let mut out: String = String::with_capacity(name.len());
    let mut in_whitespace: bool = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            out.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    out
}

/// Builds the human-shareable link for a checkpoint name.
#[must_use]
pub fn share_link(scope: LinkScope, name: &str) -> String {
    format!("{SHARE_LINK_BASE}/{}/{}", scope.segment(), slug(name))
}

/// Builds the QR-code link for a checkpoint name.
#[must_use]
pub fn qr_share_link(scope: LinkScope, name: &str) -> String {
    format!("{SHARE_LINK_BASE}/qr/{}/{}", scope.segment(), slug(name))
}
