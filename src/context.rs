// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Shared encoding context: namespace/server tables, length limits, and the
//! recursion depth guard used by Variant, ExtensionObject and DiagnosticInfo.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::{EncodingResult, Error};
use crate::namespaces::{NamespaceTable, ServerTable};
use crate::status_code::StatusCode;
use crate::type_loader::TypeLibrary;

/// Default maximum recursion depth for nested Variant/ExtensionObject/DiagnosticInfo values.
pub const DEFAULT_MAX_DECODING_DEPTH: u16 = 100;

/// Length and array limits applied while encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodingLimits {
    /// Maximum allowed UTF-8 byte length of a string. `0` disables the check.
    pub max_string_length: u32,
    /// Maximum allowed byte length of a byte string. `0` disables the check.
    pub max_byte_string_length: u32,
    /// Maximum allowed element count of an array (including flattened multi-dimensional arrays).
    /// `0` disables the check.
    pub max_array_length: u32,
    /// Maximum recursion depth for nested structures.
    pub max_decoding_depth: u16,
}

impl Default for DecodingLimits {
    fn default() -> Self {
        Self {
            max_string_length: 0,
            max_byte_string_length: 0,
            max_array_length: 0,
            max_decoding_depth: DEFAULT_MAX_DECODING_DEPTH,
        }
    }
}

impl DecodingLimits {
    /// All checks disabled, maximum recursion depth at the default.
    pub fn none() -> Self {
        Self::default()
    }

    /// Fail if `len` exceeds `max_string_length` (when set).
    pub fn check_string_length(&self, len: usize) -> EncodingResult<()> {
        check_limit(self.max_string_length, len, "string length")
    }

    /// Fail if `len` exceeds `max_byte_string_length` (when set).
    pub fn check_byte_string_length(&self, len: usize) -> EncodingResult<()> {
        check_limit(self.max_byte_string_length, len, "byte string length")
    }

    /// Fail if `len` exceeds `max_array_length` (when set).
    pub fn check_array_length(&self, len: usize) -> EncodingResult<()> {
        check_limit(self.max_array_length, len, "array length")
    }
}

fn check_limit(limit: u32, len: usize, what: &str) -> EncodingResult<()> {
    if limit != 0 && len > limit as usize {
        return Err(Error::limits_exceeded(format!(
            "{what} {len} exceeds configured limit {limit}"
        )));
    }
    Ok(())
}

/// Shared recursion depth counter. Cloning shares the same underlying counter, mirroring
/// how a decoder and the structures it recurses into all observe the same budget.
#[derive(Debug, Clone)]
pub struct DepthGauge {
    current: Rc<Cell<u16>>,
    max: u16,
}

impl DepthGauge {
    /// A fresh gauge with the given maximum depth.
    pub fn new(max: u16) -> Self {
        Self {
            current: Rc::new(Cell::new(0)),
            max,
        }
    }

    /// Enter one more level of recursion, returning a guard that exits on drop.
    pub fn obtain(&self) -> EncodingResult<DepthLock<'_>> {
        let depth = self.current.get();
        if depth >= self.max {
            log::warn!("maximum nesting depth {} exceeded", self.max);
            return Err(Error::new(
                StatusCode::BAD_ENCODING_LIMITS_EXCEEDED_DEPTH,
                format!("maximum nesting depth {} exceeded", self.max),
            ));
        }
        self.current.set(depth + 1);
        Ok(DepthLock { gauge: self })
    }
}

/// RAII guard returned by [`DepthGauge::obtain`]; decrements the shared counter on drop.
pub struct DepthLock<'a> {
    gauge: &'a DepthGauge,
}

impl Drop for DepthLock<'_> {
    fn drop(&mut self) {
        let depth = self.gauge.current.get();
        self.gauge.current.set(depth.saturating_sub(1));
    }
}

/// The full, owned environment a codec session runs against: namespace/server tables,
/// length limits, and the shared depth gauge.
#[derive(Debug, Clone)]
pub struct EncodingContext {
    namespaces: NamespaceTable,
    servers: ServerTable,
    limits: DecodingLimits,
    depth: DepthGauge,
}

impl Default for EncodingContext {
    fn default() -> Self {
        Self::new(NamespaceTable::new(), ServerTable::new(), DecodingLimits::default())
    }
}

impl EncodingContext {
    /// Build a context from explicit tables and limits.
    pub fn new(namespaces: NamespaceTable, servers: ServerTable, limits: DecodingLimits) -> Self {
        let depth = DepthGauge::new(limits.max_decoding_depth);
        Self {
            namespaces,
            servers,
            limits,
            depth,
        }
    }

    /// The namespace URI table.
    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// The namespace URI table, mutably.
    pub fn namespaces_mut(&mut self) -> &mut NamespaceTable {
        &mut self.namespaces
    }

    /// The server URI table.
    pub fn servers(&self) -> &ServerTable {
        &self.servers
    }

    /// The configured length/depth limits.
    pub fn limits(&self) -> &DecodingLimits {
        &self.limits
    }

    /// Acquire a depth guard for one more level of Variant/ExtensionObject/DiagnosticInfo nesting.
    pub fn enter_nested(&self) -> EncodingResult<DepthLock<'_>> {
        self.depth.obtain()
    }
}

/// Bundles the shared [`EncodingContext`] with the per-call reversible/non-reversible
/// toggle and the type library used to resolve structured `ExtensionObject` bodies.
pub struct Context<'a> {
    ctx: &'a EncodingContext,
    reversible: bool,
    type_library: Option<&'a dyn TypeLibrary>,
}

impl<'a> Context<'a> {
    /// Build a context view for one encode/decode session.
    pub fn new(
        ctx: &'a EncodingContext,
        reversible: bool,
        type_library: Option<&'a dyn TypeLibrary>,
    ) -> Self {
        Self {
            ctx,
            reversible,
            type_library,
        }
    }

    /// Whether reversible (lossless) form is in effect.
    pub fn reversible(&self) -> bool {
        self.reversible
    }

    /// The underlying shared context (namespaces, servers, limits, depth gauge).
    pub fn encoding_context(&self) -> &'a EncodingContext {
        self.ctx
    }

    /// The type library used to resolve `ExtensionObject` bodies, if any was supplied.
    pub fn type_library(&self) -> Option<&'a dyn TypeLibrary> {
        self.type_library
    }
}
