/*
 * Responsibility
 * - Handler から見える「認証済みユーザー」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 */
use uuid::Uuid;

/// Identity attached to an authenticated request.
///
/// Request-scoped only: resolved by the Basic-auth gate, read by handlers
/// and the ownership check, never persisted. Ownership comparisons use `id`
/// (the primary key), not a display field.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}
