//! Console reporting
//!
//! Purely observational status output: one marker per iteration, one line
//! per room visit and a multi-line card per claimed ticket. The wording
//! mirrors what the portal's operators are used to seeing; nothing here is
//! consumed by the core loop.

use crate::models::Ticket;

/// Console status reporter
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Per-room-visit progress marker
    pub fn iteration(&self, count: u64) {
        println!("📮 Итерация: {count}");
    }

    /// A room is about to be polled
    pub fn polling(&self, room_id: u32) {
        println!("📨 Получение талонов (кабинет {room_id})...");
    }

    /// The listing came back empty for this pass
    pub fn no_slots(&self, room_id: u32) {
        println!("❌ Не нашли талоны к данному врачу ({room_id}).");
        println!("📌 Пробуем снова...");
    }

    /// A candidate slot was found and will be claimed
    pub fn found(&self) {
        println!("Успех! Нашли талон 🎫");
    }

    /// A ticket was claimed; print the full card
    pub fn claimed(&self, ticket: &Ticket) {
        println!("🎉 Взяли для тебя талон 🎫");
        println!("👌 Держи ->");
        self.ticket_card(ticket);
    }

    fn ticket_card(&self, ticket: &Ticket) {
        let doctor = &ticket.doctor;
        let field = |value: &Option<String>| value.clone().unwrap_or_else(|| String::from("—"));

        println!(
            "🎫 Талон к {}",
            doctor.speciality.as_deref().unwrap_or("врачу")
        );
        println!("• 📅 Дата: {}", ticket.date.format("%Y-%m-%d %H:%M"));
        println!("• 🚪 Кабинет: {}", ticket.cabinet);
        println!("• 🔥 Статус: {}", ticket.status);
        println!("• 🚨 Причина: {}", ticket.reason);
        println!();
        println!("👩/👨 Информация о враче");
        println!("• 🎭 Имя: {}", field(&doctor.name));
        println!("• 🎀 Фамилия: {}", field(&doctor.family));
        println!("• 🍿 Отчество: {}", field(&doctor.patronymic));
        println!("• 🔧 Специальность: {}", field(&doctor.speciality));
    }
}
