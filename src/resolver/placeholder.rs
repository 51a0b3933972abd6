// src/resolver/placeholder.rs
//! Built-in sample resume shown for sections the user has not filled yet

use crate::types::{
    Certificate, Education, Experience, Language, PersonalInfo, Proficiency, Project, Skill,
    SkillLevel, SkillsAndLanguages, SocialLink,
};

pub fn personal_info() -> PersonalInfo {
    PersonalInfo {
        name: Some("Jane Doe".to_string()),
        bio: Some(
            "Passionate full stack developer with a knack for creating seamless user experiences."
                .to_string(),
        ),
        phone: Some("+1234567890".to_string()),
        location: Some("San Francisco, CA".to_string()),
        email: Some("janedoe@example.com".to_string()),
        website: Some("www.janedoe.com".to_string()),
        social_links: Some(vec![
            SocialLink::new("LinkedIn", "janedoe32"),
            SocialLink::new("Twitter", "janedoe24"),
            SocialLink::new("GitHub", "janedoe53"),
        ]),
        summary: Some(
            "Dedicated and efficient full stack developer with 5+ years of experience in web \
             development. Skilled in modern web technologies and passionate about learning new \
             things. Adept at problem-solving and committed to delivering high-quality solutions. \
             Proven track record of working in agile environments and collaborating with \
             cross-functional teams."
                .to_string(),
        ),
    }
}

pub fn skills_and_languages() -> SkillsAndLanguages {
    let skill = |name: &str, level: SkillLevel| Skill {
        skill_name: name.to_string(),
        skill_level: level,
    };
    let language = |name: &str, proficiency: Proficiency| Language {
        language_name: name.to_string(),
        proficiency,
    };

    SkillsAndLanguages {
        skills: vec![
            skill("HTML", SkillLevel::Expert),
            skill("CSS", SkillLevel::Expert),
            skill("JavaScript", SkillLevel::Expert),
            skill("React", SkillLevel::Expert),
            skill("Node.js", SkillLevel::Intermediate),
            skill("MongoDB", SkillLevel::Intermediate),
        ],
        languages: vec![
            language("English", Proficiency::Fluent),
            language("Spanish", Proficiency::Intermediate),
        ],
    }
}

pub fn educations() -> Vec<Education> {
    vec![
        Education {
            institution_name: "Stanford University".to_string(),
            website: Some("https://www.stanford.edu".to_string()),
            area_of_study: "Computer Science".to_string(),
            type_of_study: "Bachelor of Science".to_string(),
            description: None,
            start_date: "2015-09-01T00:00:00.000Z".to_string(),
            end_date: Some("2019-06-15T00:00:00.000Z".to_string()),
            ongoing: false,
        },
        Education {
            institution_name: "Online Certification".to_string(),
            website: Some("https://www.coursera.org".to_string()),
            area_of_study: "Web Development".to_string(),
            type_of_study: "Full Stack Web Development".to_string(),
            description: None,
            start_date: "2020-01-01T00:00:00.000Z".to_string(),
            end_date: None,
            ongoing: true,
        },
    ]
}

pub fn projects() -> Vec<Project> {
    let technologies =
        |items: &[&str]| Some(items.iter().map(|t| t.to_string()).collect::<Vec<_>>());

    vec![
        Project {
            project_name: "Personal Portfolio".to_string(),
            website: Some("https://www.janedoe.com/portfolio".to_string()),
            description: Some(
                "Developed a personal portfolio to showcase my projects and skills. The portfolio \
                 includes detailed descriptions of each project, the technologies used, and the \
                 challenges faced during development. Implemented responsive design and optimized \
                 for performance."
                    .to_string(),
            ),
            start_date: "2021-01-01T00:00:00.000Z".to_string(),
            end_date: Some("2021-03-01T00:00:00.000Z".to_string()),
            ongoing: false,
            technologies: technologies(&["React", "Next.js", "Tailwind CSS", "Vercel", "TypeScript"]),
        },
        Project {
            project_name: "E-commerce Platform".to_string(),
            website: Some("https://www.shoponline.com".to_string()),
            description: Some(
                "Built a full-fledged e-commerce platform with user authentication and product \
                 management. The platform supports various payment methods, real-time inventory \
                 tracking, and a user-friendly interface. Integrated third-party APIs for enhanced \
                 functionality."
                    .to_string(),
            ),
            start_date: "2022-05-01T00:00:00.000Z".to_string(),
            end_date: Some("2022-08-01T00:00:00.000Z".to_string()),
            ongoing: false,
            technologies: technologies(&["Node.js", "Express", "MongoDB", "Stripe", "React", "Redux"]),
        },
    ]
}

pub fn experiences() -> Vec<Experience> {
    vec![
        Experience {
            company_name: "Tech Solutions Inc.".to_string(),
            position: "Full Stack Developer".to_string(),
            description: Some(
                "Led the development of web applications and collaborated with cross-functional \
                 teams to deliver high-quality products. Implemented best practices for code \
                 quality and performance optimization. Responsible for designing and implementing \
                 scalable and efficient solutions to complex problems."
                    .to_string(),
            ),
            start_date: "2020-07-01T00:00:00.000Z".to_string(),
            end_date: Some("2023-05-01T00:00:00.000Z".to_string()),
            currently_working: false,
        },
        Experience {
            company_name: "Innovatech".to_string(),
            position: "Frontend Developer".to_string(),
            description: Some(
                "Implemented responsive UI components and ensured seamless user experience. Worked \
                 closely with designers to translate design mockups into functional and visually \
                 appealing web pages. Optimized the front-end codebase for performance and \
                 maintainability."
                    .to_string(),
            ),
            start_date: "2019-01-01T00:00:00.000Z".to_string(),
            end_date: Some("2020-06-01T00:00:00.000Z".to_string()),
            currently_working: false,
        },
    ]
}

pub fn certificates() -> Vec<Certificate> {
    vec![
        Certificate {
            certificate_name: "Certified Full Stack Developer".to_string(),
            issued_by: "Coursera".to_string(),
            date: Some("2020-06-01T00:00:00.000Z".to_string()),
            website: Some("https://www.coursera.org/certificate/example".to_string()),
            description: Some(
                "Certification in full stack web development covering various modern \
                 technologies. The course included hands-on projects and real-world scenarios to \
                 build practical skills."
                    .to_string(),
            ),
        },
        Certificate {
            certificate_name: "Advanced React".to_string(),
            issued_by: "Udemy".to_string(),
            date: Some("2021-12-01T00:00:00.000Z".to_string()),
            website: Some("https://www.udemy.com/certificate/example".to_string()),
            description: Some(
                "Comprehensive course on advanced React concepts and best practices. Topics \
                 covered include state management, performance optimization, and building \
                 scalable applications."
                    .to_string(),
            ),
        },
    ]
}
