//! Simulated login flow
//!
//! Email/password and phone/OTP paths with fixed latencies. No transport,
//! no real credentials: a successful "login" only closes the modal.

use crate::services::delay::Delay;
use rand::Rng;
use std::time::{Duration, Instant};

pub const EMAIL_DELAY: Duration = Duration::from_millis(600);
pub const SEND_OTP_DELAY: Duration = Duration::from_millis(900);
pub const VERIFY_DELAY: Duration = Duration::from_millis(700);
pub const CLOSE_DELAY: Duration = Duration::from_millis(900);

pub const MSG_MISSING_CREDENTIALS: &str = "Please enter both email and password.";
pub const MSG_INVALID_PHONE: &str = "Please enter a valid phone number.";
pub const MSG_EMAIL_SUCCESS: &str = "Logged in successfully (demo).";
pub const MSG_PHONE_SUCCESS: &str = "Phone verified — logged in (demo).";
pub const MSG_INVALID_OTP: &str = "Invalid OTP. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    Choose,
    Email,
    Phone,
    Otp,
    Success,
}

/// Delayed update the flow is waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    EmailLogin,
    SendOtp,
    VerifyOtp,
    Close,
}

/// Login modal state
#[derive(Debug, Default)]
pub struct LoginFlow {
    open: bool,
    pub mode: LoginMode,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub otp: String,
    generated_otp: Option<String>,
    pub sending: bool,
    pub verifying: bool,
    pub message: Option<String>,
    pending: Option<(Pending, Delay)>,
}

impl LoginFlow {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.reset();
        self.open = true;
    }

    /// Close the modal, dropping all input and pending work
    pub fn close(&mut self) {
        self.open = false;
        self.reset();
    }

    fn reset(&mut self) {
        self.cancel_pending();
        self.mode = LoginMode::Choose;
        self.email.clear();
        self.password.clear();
        self.phone.clear();
        self.otp.clear();
        self.generated_otp = None;
        self.sending = false;
        self.verifying = false;
        self.message = None;
    }

    fn cancel_pending(&mut self) {
        if let Some((_, mut d)) = self.pending.take() {
            d.cancel();
        }
    }

    fn schedule(&mut self, what: Pending, now: Instant, after: Duration) {
        self.cancel_pending();
        self.pending = Some((what, Delay::starting_at(now, after)));
    }

    pub fn choose_email(&mut self) {
        self.mode = LoginMode::Email;
    }

    pub fn choose_phone(&mut self) {
        self.mode = LoginMode::Phone;
    }

    /// Return to the method choice. A request already in flight still
    /// lands; only closing the modal cancels it.
    pub fn go_back(&mut self) {
        self.mode = LoginMode::Choose;
        self.message = None;
    }

    pub fn submit_email(&mut self, now: Instant) {
        self.message = None;
        if self.email.is_empty() || self.password.is_empty() {
            self.message = Some(MSG_MISSING_CREDENTIALS.to_string());
            return;
        }
        self.schedule(Pending::EmailLogin, now, EMAIL_DELAY);
    }

    pub fn submit_phone(&mut self, now: Instant) {
        self.message = None;
        if self.phone.chars().count() < 6 {
            self.message = Some(MSG_INVALID_PHONE.to_string());
            return;
        }
        self.sending = true;
        self.schedule(Pending::SendOtp, now, SEND_OTP_DELAY);
    }

    pub fn verify_otp(&mut self, now: Instant) {
        self.verifying = true;
        self.message = None;
        self.schedule(Pending::VerifyOtp, now, VERIFY_DELAY);
    }

    /// The code generated for the current phone attempt
    pub fn generated_otp(&self) -> Option<&str> {
        self.generated_otp.as_deref()
    }

    /// Apply any due delayed update. Returns true when the modal just closed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.open {
            return false;
        }
        let Some((what, delay)) = self.pending.as_mut() else {
            return false;
        };
        if !delay.poll(now) {
            return false;
        }
        let what = *what;
        self.pending = None;

        match what {
            Pending::EmailLogin => {
                self.mode = LoginMode::Success;
                self.message = Some(MSG_EMAIL_SUCCESS.to_string());
                self.schedule(Pending::Close, now, CLOSE_DELAY);
            }
            Pending::SendOtp => {
                let code = rand::rng().random_range(100_000..=999_999u32).to_string();
                tracing::debug!(phone = %self.phone, "simulated OTP generated");
                self.generated_otp = Some(code);
                self.sending = false;
                self.mode = LoginMode::Otp;
                self.message = Some(format!("OTP sent to {}", self.phone));
            }
            Pending::VerifyOtp => {
                self.verifying = false;
                let matches = self
                    .generated_otp
                    .as_deref()
                    .is_some_and(|code| self.otp.trim() == code);
                if matches {
                    self.mode = LoginMode::Success;
                    self.message = Some(MSG_PHONE_SUCCESS.to_string());
                    self.schedule(Pending::Close, now, CLOSE_DELAY);
                } else {
                    self.message = Some(MSG_INVALID_OTP.to_string());
                }
            }
            Pending::Close => {
                tracing::info!("login modal closed after simulated login");
                self.close();
                return true;
            }
        }
        false
    }
}

impl Drop for LoginFlow {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> LoginFlow {
        let mut flow = LoginFlow::default();
        flow.open();
        flow
    }

    #[test]
    fn test_email_requires_both_fields() {
        let mut flow = opened();
        flow.choose_email();
        flow.email = "a@b.co".into();
        flow.submit_email(Instant::now());
        assert_eq!(flow.message.as_deref(), Some(MSG_MISSING_CREDENTIALS));
        assert_eq!(flow.mode, LoginMode::Email);
    }

    #[test]
    fn test_email_login_succeeds_then_closes() {
        let mut flow = opened();
        flow.choose_email();
        flow.email = "a@b.co".into();
        flow.password = "secret".into();

        let t0 = Instant::now();
        flow.submit_email(t0);
        assert!(!flow.tick(t0 + Duration::from_millis(100)));
        assert_eq!(flow.mode, LoginMode::Email);

        let t1 = t0 + EMAIL_DELAY;
        assert!(!flow.tick(t1));
        assert_eq!(flow.mode, LoginMode::Success);
        assert_eq!(flow.message.as_deref(), Some(MSG_EMAIL_SUCCESS));

        assert!(flow.tick(t1 + CLOSE_DELAY));
        assert!(!flow.is_open());
        assert!(flow.email.is_empty());
    }

    #[test]
    fn test_short_phone_rejected() {
        let mut flow = opened();
        flow.choose_phone();
        flow.phone = "12345".into();
        flow.submit_phone(Instant::now());
        assert_eq!(flow.message.as_deref(), Some(MSG_INVALID_PHONE));
        assert!(!flow.sending);
    }

    fn flow_at_otp(t0: Instant) -> LoginFlow {
        let mut flow = opened();
        flow.choose_phone();
        flow.phone = "9876543210".into();
        flow.submit_phone(t0);
        assert!(flow.sending);
        flow.tick(t0 + SEND_OTP_DELAY);
        assert_eq!(flow.mode, LoginMode::Otp);
        flow
    }

    #[test]
    fn test_otp_is_six_digits() {
        let flow = flow_at_otp(Instant::now());
        let code = flow.generated_otp().unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert!(!code.starts_with('0'));
        assert_eq!(flow.message.as_deref(), Some("OTP sent to 9876543210"));
        assert!(!flow.sending);
    }

    #[test]
    fn test_wrong_otp_keeps_input_and_allows_retry() {
        let t0 = Instant::now();
        let mut flow = flow_at_otp(t0);
        flow.otp = "000000".into();

        let t1 = t0 + Duration::from_secs(2);
        flow.verify_otp(t1);
        assert!(flow.verifying);
        flow.tick(t1 + VERIFY_DELAY);
        assert!(!flow.verifying);
        assert_eq!(flow.message.as_deref(), Some(MSG_INVALID_OTP));
        assert_eq!(flow.mode, LoginMode::Otp);
        assert_eq!(flow.otp, "000000");
        assert_eq!(flow.phone, "9876543210");

        flow.otp = format!(" {} ", flow.generated_otp().unwrap());
        let t2 = t1 + Duration::from_secs(2);
        flow.verify_otp(t2);
        flow.tick(t2 + VERIFY_DELAY);
        assert_eq!(flow.mode, LoginMode::Success);
        assert_eq!(flow.message.as_deref(), Some(MSG_PHONE_SUCCESS));
    }

    #[test]
    fn test_closing_cancels_pending_update() {
        let t0 = Instant::now();
        let mut flow = opened();
        flow.choose_phone();
        flow.phone = "9876543210".into();
        flow.submit_phone(t0);
        flow.close();

        assert!(!flow.tick(t0 + Duration::from_secs(5)));
        assert_eq!(flow.mode, LoginMode::Choose);
        assert_eq!(flow.generated_otp(), None);
    }

    #[test]
    fn test_go_back_clears_message() {
        let mut flow = opened();
        flow.choose_email();
        flow.submit_email(Instant::now());
        assert!(flow.message.is_some());
        flow.go_back();
        assert_eq!(flow.mode, LoginMode::Choose);
        assert!(flow.message.is_none());
    }

    #[test]
    fn test_go_back_keeps_request_in_flight() {
        let mut flow = opened();
        flow.choose_email();
        flow.email = "a@b.co".into();
        flow.password = "secret".into();

        let t0 = Instant::now();
        flow.submit_email(t0);
        flow.go_back();
        assert_eq!(flow.mode, LoginMode::Choose);

        assert!(!flow.tick(t0 + EMAIL_DELAY));
        assert_eq!(flow.mode, LoginMode::Success);
        assert_eq!(flow.message.as_deref(), Some(MSG_EMAIL_SUCCESS));
        assert!(flow.tick(t0 + EMAIL_DELAY + CLOSE_DELAY));
        assert!(!flow.is_open());
    }

    #[test]
    fn test_reopen_resets_fields() {
        let mut flow = opened();
        flow.choose_email();
        flow.email = "x".into();
        flow.close();
        flow.open();
        assert_eq!(flow.mode, LoginMode::Choose);
        assert!(flow.email.is_empty());
    }
}
