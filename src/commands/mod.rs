pub mod certifications_command;
