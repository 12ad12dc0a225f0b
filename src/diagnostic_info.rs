// OPCUA for Rust
// SPDX-License-Identifier: MPL-2.0

//! Contains the implementation of `DiagnosticInfo`: a recursive record of indices into a
//! separate (session-scoped) string table, used to avoid repeating the same diagnostic
//! strings across a large response.

use std::io::Write;

use struson::writer::{JsonStreamWriter, JsonWriter};

use crate::context::Context;
use crate::decoder::JsonDecoder;
use crate::encoding::UaNullable;
use crate::error::EncodingResult;
use crate::json::{write_field, JsonDecodable, JsonEncodable};
use crate::status_code::{write_status_code_field, StatusCode};
use crate::string::UaString;

/// A diagnostic record referencing entries of a caller-maintained string table by index.
/// `-1` (modeled here as `None`) means the corresponding entry is absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagnosticInfo {
    /// Index into the string table of the vendor-specific error symbol.
    pub symbolic_id: Option<i32>,
    /// Index into the string table of the namespace that qualifies `symbolic_id`.
    pub namespace_uri: Option<i32>,
    /// Index into the string table of the locale of `localized_text`.
    pub locale: Option<i32>,
    /// Index into the string table of a localized description.
    pub localized_text: Option<i32>,
    /// Additional free-form diagnostic text.
    pub additional_info: Option<UaString>,
    /// The status code of the operation that produced the inner diagnostic, if different
    /// from the operation's own reported status.
    pub inner_status_code: Option<StatusCode>,
    /// A chained diagnostic describing the cause of this one.
    pub inner_diagnostic_info: Option<Box<DiagnosticInfo>>,
}

impl UaNullable for DiagnosticInfo {
    fn is_ua_null(&self) -> bool {
        self.symbolic_id.is_none()
            && self.namespace_uri.is_none()
            && self.locale.is_none()
            && self.localized_text.is_none()
            && self.additional_info.is_none()
            && self.inner_status_code.is_none()
            && self.inner_diagnostic_info.is_none()
    }
}

impl JsonEncodable for DiagnosticInfo {
    fn encode(&self, stream: &mut JsonStreamWriter<&mut dyn Write>, ctx: &Context<'_>) -> EncodingResult<()> {
        let _depth = ctx.encoding_context().enter_nested()?;
        stream.begin_object()?;
        write_field(stream, ctx, "SymbolicId", &self.symbolic_id)?;
        write_field(stream, ctx, "NamespaceUri", &self.namespace_uri)?;
        write_field(stream, ctx, "Locale", &self.locale)?;
        write_field(stream, ctx, "LocalizedText", &self.localized_text)?;
        write_field(stream, ctx, "AdditionalInfo", &self.additional_info)?;
        if let Some(code) = &self.inner_status_code {
            write_status_code_field(stream, ctx, "InnerStatusCode", code)?;
        }
        write_field(stream, ctx, "InnerDiagnosticInfo", &self.inner_diagnostic_info)?;
        stream.end_object()?;
        Ok(())
    }
}

impl JsonDecodable for DiagnosticInfo {
    fn decode(decoder: &mut JsonDecoder<'_>) -> EncodingResult<Self> {
        if decoder.current_is_null() {
            return Ok(DiagnosticInfo::default());
        }
        let _depth = decoder.ctx().encoding_context().enter_nested()?;
        Ok(DiagnosticInfo {
            symbolic_id: decoder.read(Some("SymbolicId"))?,
            namespace_uri: decoder.read(Some("NamespaceUri"))?,
            locale: decoder.read(Some("Locale"))?,
            localized_text: decoder.read(Some("LocalizedText"))?,
            additional_info: decoder.read(Some("AdditionalInfo"))?,
            inner_status_code: decoder.read(Some("InnerStatusCode"))?,
            inner_diagnostic_info: decoder.read(Some("InnerDiagnosticInfo"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_null() {
        assert!(DiagnosticInfo::default().is_ua_null());
    }
}
