use crate::model::{person::PersonForm, photo::Photo};

const SAMPLE_PEOPLE: [(&str, &str, &str, &str, &str); 16] = [
    ("Ana Silva Santos", "ana.silva@company.com", "(11) 99876-5432", "Developer", "774909"),
    ("Carlos Eduardo Lima", "carlos.lima@company.com", "(11) 98765-4321", "Designer", "1222271"),
    ("Mariana Costa Oliveira", "mariana.costa@company.com", "(11) 97654-3210", "Manager", "1239291"),
    ("João Pedro Almeida", "joao.almeida@company.com", "(11) 96543-2109", "Analyst", "1681010"),
    ("Fernanda Rodrigues", "fernanda.rodrigues@company.com", "(11) 95432-1098", "Coordinator", "1130626"),
    ("Rafael Santos Pereira", "rafael.pereira@company.com", "(11) 94321-0987", "Developer", "1043471"),
    ("Juliana Mendes Silva", "juliana.mendes@company.com", "(11) 93210-9876", "Designer", "1036623"),
    ("Bruno Ferreira Costa", "bruno.ferreira@company.com", "(11) 92109-8765", "Director", "1212984"),
    ("Camila Souza Lima", "camila.souza@company.com", "(11) 91098-7654", "Intern", "1181686"),
    ("Diego Martins Oliveira", "diego.martins@company.com", "(11) 90987-6543", "Developer", "1040880"),
    ("Larissa Barbosa Santos", "larissa.barbosa@company.com", "(11) 89876-5432", "Analyst", "1181424"),
    ("Thiago Ribeiro Silva", "thiago.ribeiro@company.com", "(11) 88765-4321", "Manager", "1043474"),
    ("Patrícia Gomes Alves", "patricia.gomes@company.com", "(11) 87654-3210", "Designer", "1181690"),
    ("Rodrigo Carvalho Lima", "rodrigo.carvalho@company.com", "(11) 86543-2109", "Coordinator", "1040881"),
    ("Lucas Andrade Pereira", "lucas.andrade@company.com", "(11) 84321-0987", "Intern", "1043473"),
    ("Wagner Santana Costa", "wagner.santana@company.com", "(11) 50987-6543", "Other", "1040897"),
];

fn photo_url(photo_id: &str) -> String {
    format!(
        "https://images.pexels.com/photos/{id}/pexels-photo-{id}.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&fit=crop",
        id = photo_id
    )
}

/// Forms for the sample people, oldest first
pub fn sample_forms() -> Vec<PersonForm> {
    SAMPLE_PEOPLE
        .iter()
        .map(|(name, email, phone, role, photo_id)| {
            PersonForm::new(name, email, phone, role).with_photo(Photo::Url(photo_url(photo_id)))
        })
        .collect()
}
