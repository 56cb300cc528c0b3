//! Built-in S1 catalogs for each branch.
//!
//! Configuration data, not logic: subject coefficients, credits and which
//! continuous-assessment components each subject carries. Credits per
//! branch sum to 30. The GL coefficients sum to `GL_COEFFICIENT_TOTAL`,
//! which the GL semester formula uses as its fixed divisor.

use super::Branch;
use crate::grading::types::{Module, Subject};

fn module(id: &str, title: &str, subjects: Vec<Subject>) -> Module {
    Module {
        id: id.to_string(),
        title: title.to_string(),
        subjects,
    }
}

pub(super) fn modules(branch: Branch) -> Vec<Module> {
    match branch {
        Branch::Iad => iad(),
        Branch::Gl => gl(),
        Branch::Gi => gi(),
        Branch::Rt => rt(),
    }
}

fn iad() -> Vec<Module> {
    vec![
        module(
            "iad-fond",
            "Fondements de l'IA",
            vec![
                Subject::new("iad-ml", "Apprentissage Automatique", 3.0, 6.0, true, true),
                Subject::new(
                    "iad-rc",
                    "Représentation des Connaissances",
                    2.0,
                    4.0,
                    true,
                    false,
                ),
            ],
        ),
        module(
            "iad-data",
            "Science des Données",
            vec![
                Subject::new("iad-fd", "Fouille de Données", 2.0, 5.0, true, true),
                Subject::new("iad-stat", "Statistiques Avancées", 2.0, 4.0, true, false),
            ],
        ),
        module(
            "iad-digit",
            "Digitalisation",
            vec![
                Subject::new("iad-td", "Transformation Digitale", 2.0, 4.0, false, false),
                Subject::new(
                    "iad-web",
                    "Développement Web Avancé",
                    2.0,
                    4.0,
                    false,
                    true,
                ),
            ],
        ),
        module(
            "iad-trans",
            "Unité Transversale",
            vec![
                Subject::new("iad-ang", "Anglais Scientifique", 1.0, 1.0, false, false),
                Subject::new(
                    "iad-metho",
                    "Méthodologie de Recherche",
                    1.0,
                    2.0,
                    false,
                    false,
                ),
            ],
        ),
    ]
}

fn gl() -> Vec<Module> {
    vec![
        module(
            "gl-genie",
            "Génie Logiciel Avancé",
            vec![
                Subject::new("gl-archi", "Architecture Logicielle", 3.0, 5.0, true, false),
                Subject::new("gl-qual", "Qualité et Tests Logiciels", 2.0, 4.0, true, true),
            ],
        ),
        module(
            "gl-dev",
            "Développement",
            vec![
                Subject::new("gl-prog", "Programmation Avancée", 3.0, 5.0, true, true),
                Subject::new(
                    "gl-bdd",
                    "Bases de Données Avancées",
                    2.0,
                    4.0,
                    false,
                    true,
                ),
            ],
        ),
        module(
            "gl-sys",
            "Systèmes",
            vec![
                Subject::new("gl-dist", "Systèmes Distribués", 2.0, 4.0, true, false),
                Subject::new("gl-secu", "Sécurité Informatique", 2.0, 3.0, false, false),
            ],
        ),
        module(
            "gl-trans",
            "Unité Transversale",
            vec![
                Subject::new("gl-ang", "Anglais", 1.0, 2.0, false, false),
                Subject::new("gl-ro", "Recherche Opérationnelle", 1.0, 3.0, true, false),
            ],
        ),
    ]
}

fn gi() -> Vec<Module> {
    vec![
        module(
            "gi-archi",
            "Architecture et Systèmes",
            vec![
                Subject::new(
                    "gi-archi",
                    "Architecture des Ordinateurs Avancée",
                    3.0,
                    5.0,
                    true,
                    false,
                ),
                Subject::new("gi-emb", "Systèmes Embarqués", 2.0, 4.0, false, true),
            ],
        ),
        module(
            "gi-res",
            "Réseaux et Administration",
            vec![
                Subject::new(
                    "gi-admin",
                    "Administration des Systèmes",
                    2.0,
                    4.0,
                    false,
                    true,
                ),
                Subject::new("gi-resav", "Réseaux Avancés", 2.0, 5.0, true, true),
            ],
        ),
        module(
            "gi-lang",
            "Langages et Compilation",
            vec![
                Subject::new("gi-comp", "Compilation", 3.0, 5.0, true, true),
                Subject::new("gi-tl", "Théorie des Langages", 2.0, 4.0, true, false),
            ],
        ),
        module(
            "gi-trans",
            "Unité Transversale",
            vec![
                Subject::new("gi-ang", "Anglais", 1.0, 1.0, false, false),
                Subject::new("gi-entr", "Entrepreneuriat", 1.0, 2.0, false, false),
            ],
        ),
    ]
}

fn rt() -> Vec<Module> {
    vec![
        module(
            "rt-res",
            "Réseaux",
            vec![
                Subject::new("rt-mob", "Réseaux Mobiles", 3.0, 5.0, true, false),
                Subject::new("rt-rout", "Commutation et Routage", 2.0, 5.0, true, true),
            ],
        ),
        module(
            "rt-telecom",
            "Télécommunications",
            vec![
                Subject::new("rt-signal", "Traitement du Signal", 3.0, 5.0, true, true),
                Subject::new("rt-trans", "Transmission Numérique", 2.0, 4.0, true, false),
            ],
        ),
        module(
            "rt-services",
            "Services Réseaux",
            vec![
                Subject::new("rt-secu", "Sécurité des Réseaux", 2.0, 4.0, false, true),
                Subject::new("rt-admin", "Administration des Réseaux", 2.0, 4.0, false, true),
            ],
        ),
        module(
            "rt-trans-u",
            "Unité Transversale",
            vec![
                Subject::new("rt-ang", "Anglais Technique", 1.0, 1.0, false, false),
                Subject::new("rt-metho", "Méthodologie", 1.0, 2.0, false, false),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{validate_catalog, GL_COEFFICIENT_TOTAL};

    #[test]
    fn test_builtin_catalogs_satisfy_invariants() {
        for branch in Branch::ALL {
            let catalog = branch.modules();
            assert!(
                validate_catalog(branch, &catalog).is_ok(),
                "catalog for {} is invalid",
                branch.id()
            );
        }
    }

    #[test]
    fn test_catalogs_start_with_empty_grades() {
        for branch in Branch::ALL {
            for module in branch.modules() {
                for subject in &module.subjects {
                    assert_eq!(subject.grades.td, "");
                    assert_eq!(subject.grades.tp, "");
                    assert_eq!(subject.grades.exam, "");
                }
            }
        }
    }

    #[test]
    fn test_credits_sum_to_thirty_per_branch() {
        for branch in Branch::ALL {
            let total: f64 = branch
                .modules()
                .iter()
                .flat_map(|m| m.subjects.iter())
                .map(|s| s.credits)
                .sum();
            assert_eq!(total, 30.0, "credits for {}", branch.id());
        }
    }

    // Pins the fixed GL divisor to the GL catalog. If this fails, the
    // curriculum changed and GL_COEFFICIENT_TOTAL must change with it.
    #[test]
    fn test_gl_coefficient_total_matches_divisor() {
        let total: f64 = Branch::Gl
            .modules()
            .iter()
            .flat_map(|m| m.subjects.iter())
            .map(|s| s.coefficient)
            .sum();
        assert_eq!(total, GL_COEFFICIENT_TOTAL);
    }

    #[test]
    fn test_subject_ids_unique_within_branch() {
        for branch in Branch::ALL {
            let mut ids: Vec<String> = branch
                .modules()
                .iter()
                .flat_map(|m| m.subjects.iter())
                .map(|s| s.id.clone())
                .collect();
            let before = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), before, "duplicate subject id in {}", branch.id());
        }
    }
}
