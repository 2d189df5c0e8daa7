use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ResumeExperience {
    pub company: &'static str,
    pub position: &'static str,
    pub duration: &'static str,
    pub location: &'static str,
    pub highlights: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct ResumeEducation {
    pub institution: &'static str,
    pub degree: &'static str,
    pub duration: &'static str,
    pub details: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ResumeSkillGroup {
    pub name: &'static str,
    pub skills: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct Certification {
    pub name: &'static str,
    pub issuer: &'static str,
    pub year: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Resume {
    pub headline: &'static str,
    pub summary: &'static str,
    pub experience: &'static [ResumeExperience],
    pub education: &'static [ResumeEducation],
    pub skills: &'static [ResumeSkillGroup],
    pub certifications: &'static [Certification],
}

pub static RESUME: Resume = Resume {
    headline: "A comprehensive overview of my professional experience, skills, and qualifications.",
    summary: "Passionate UI/UX Designer and Frontend Developer with 5+ years of experience creating \
              user-centered digital experiences.",
    experience: &[
        ResumeExperience {
            company: "TechCorp Inc.",
            position: "Senior UI/UX Designer",
            duration: "2022 - Present",
            location: "San Francisco, CA",
            highlights: &[
                "Led design initiatives for 3 major product launches, resulting in 40% increase in user engagement",
                "Collaborated with cross-functional teams to deliver pixel-perfect designs within tight deadlines",
                "Established and maintained design system used across 5 different product lines",
                "Mentored junior designers and conducted design reviews for quality assurance",
            ],
        },
        ResumeExperience {
            company: "StartupXYZ",
            position: "Frontend Designer & Developer",
            duration: "2020 - 2022",
            location: "Remote",
            highlights: &[
                "Designed and developed responsive web applications using React and TypeScript",
                "Reduced page load times by 60% through optimization and performance improvements",
                "Implemented accessibility standards achieving WCAG 2.1 AA compliance",
                "Worked closely with product managers to translate requirements into user-friendly interfaces",
            ],
        },
        ResumeExperience {
            company: "Creative Agency",
            position: "Junior Web Designer",
            duration: "2019 - 2020",
            location: "New York, NY",
            highlights: &[
                "Created visual designs for client websites and marketing materials",
                "Collaborated with developers to ensure design feasibility and implementation",
                "Participated in client meetings and presentation of design concepts",
                "Maintained brand consistency across multiple client projects",
            ],
        },
    ],
    education: &[
        ResumeEducation {
            institution: "University of California, Berkeley",
            degree: "Bachelor of Arts in Visual Design",
            duration: "2015 - 2019",
            details: "Magna Cum Laude, Design Society President",
        },
        ResumeEducation {
            institution: "Stanford Continuing Studies",
            degree: "Certificate in Human-Computer Interaction",
            duration: "2021",
            details: "Specialized in user research and interaction design",
        },
    ],
    skills: &[
        ResumeSkillGroup { name: "Design", skills: &["Figma", "Sketch", "Adobe Creative Suite", "Framer", "Principle"] },
        ResumeSkillGroup { name: "Development", skills: &["React", "TypeScript", "Next.js", "Tailwind CSS", "Node.js"] },
        ResumeSkillGroup { name: "Tools", skills: &["Git", "Jira", "Notion", "Miro", "Slack"] },
        ResumeSkillGroup {
            name: "Soft Skills",
            skills: &["Team Leadership", "Project Management", "User Research", "Stakeholder Communication"],
        },
    ],
    certifications: &[
        Certification { name: "Google UX Design Certificate", issuer: "Google", year: "2023" },
        Certification { name: "AWS Certified Cloud Practitioner", issuer: "Amazon Web Services", year: "2022" },
        Certification { name: "Certified Scrum Master", issuer: "Scrum Alliance", year: "2021" },
    ],
};
