use crate::{
    common::{error::CasinoError, event::SessionEvent},
    worker::casino::Casino,
};

#[derive(Debug, Default)]
pub struct Processor {}
impl Processor {
    pub fn new() -> Self {
        Self {}
    }

    pub fn process(&mut self, casino: &mut Casino, event: SessionEvent) -> Result<(), CasinoError> {
        match event {
            SessionEvent::Register {
                email,
                password,
                name,
            } => {
                casino.register(&email, &password, &name)?;
            }
            SessionEvent::Login { email, password } => {
                casino.login(&email, &password)?;
            }
            SessionEvent::Logout => casino.logout(),
            SessionEvent::Deposit { amount } => {
                casino.deposit(amount)?;
            }
            SessionEvent::Withdraw { amount, address } => {
                casino.withdraw(amount, &address)?;
            }
            SessionEvent::Play { game, amount } => {
                casino.play(game, amount)?;
            }
        }
        Ok(())
    }
}
