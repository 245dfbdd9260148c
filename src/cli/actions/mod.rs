pub mod login;
pub mod logout;
pub mod whoami;

#[derive(Debug)]
pub enum Action {
    Login { email: String, password: String },
    Whoami { path: String, admin: bool },
    Logout,
}
