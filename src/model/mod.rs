/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
/// Token models and the client-credentials request
pub mod auth;
/// HTTP client with transparent token refresh
pub mod http;
