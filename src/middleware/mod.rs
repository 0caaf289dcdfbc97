/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 */
pub mod basic_auth;
pub mod cors;
pub mod http;
pub mod security_headers;
