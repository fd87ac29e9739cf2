//! Demonstration records.

use time::macros::datetime;

use crate::record::NewClient;

/// The fixed demonstration set, in insertion order.
///
/// Ids are left to the store. Dates, flags and photos are fixed.
pub fn sample_clients() -> Vec<NewClient> {
    vec![
        NewClient::new(
            "Marie Diop",
            "77 123 45 67",
            "Robe de soirée bleu marine",
            25000,
        )
        .measurements("Tour de poitrine: 92cm, Tour de taille: 75cm, Tour de hanches: 98cm")
        .fabric_photo(
            "https://images.unsplash.com/photo-1578140225210-49da25cdf9d6?q=80&w=300&auto=format&fit=crop",
        )
        .date(datetime!(2023-10-15 0:00 UTC)),
        NewClient::new(
            "Amadou Ndiaye",
            "76 987 65 43",
            "Costume trois pièces gris",
            45000,
        )
        .measurements("Épaules: 45cm, Tour de poitrine: 102cm, Tour de taille: 88cm")
        .date(datetime!(2023-09-29 0:00 UTC))
        .delivered(true),
        NewClient::new(
            "Fatou Sall",
            "70 111 22 33",
            "Ensemble pagne traditionnel",
            18000,
        )
        .measurements("Tour de poitrine: 88cm, Tour de taille: 70cm, Tour de hanches: 94cm")
        .fabric_photo(
            "https://images.unsplash.com/photo-1611043714658-af3e56bc5299?q=80&w=300&auto=format&fit=crop",
        )
        .date(datetime!(2023-11-05 0:00 UTC)),
        NewClient::new(
            "Omar Seck",
            "78 444 55 66",
            "Chemise sur mesure en lin blanc",
            15000,
        )
        .measurements("Cou: 39cm, Épaules: 44cm, Poitrine: 98cm, Longueur des manches: 65cm")
        .date(datetime!(2023-08-20 0:00 UTC))
        .delivered(true)
        .archived(true),
    ]
}
