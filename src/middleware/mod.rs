/*
 * Responsibility
 * - Router-level middleware: claims extraction, CORS, transport concerns
 */
pub mod auth;
pub mod cors;
pub mod http;
